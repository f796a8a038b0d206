//! Parser module — comment grammar and declaration association.

pub mod block;
pub mod scanner;

pub use block::parse_block;
pub use scanner::{scan_lines, Classified, FileScan, ScanState, Scanner};
