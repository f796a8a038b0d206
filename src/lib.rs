//! testgen — extract Given/When/Then test intents from UI test sources.
//!
//! Scans a tree for `*.swift` files under a `UITests` path, pairs each
//! `func test...` declaration with the structured comment block directly
//! above it, and reports documented and orphan tests separately.

pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod parser;
pub mod walk;

pub use error::{Error, Result};
pub use model::{Report, Summary, Tag, Test, TestCase, TestData};
pub use walk::scan_tree;
