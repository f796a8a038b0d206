//! Comment-to-test association — line-by-line state machine.
//!
//! A test declaration is documented only when the last control event before
//! it was a completed comment block. A `}` at the start of a line or a
//! consumed declaration resets the association.

use crate::model::{Test, TestCase};
use crate::parser::block::parse_block;
use tracing::debug;

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const SCOPE_CLOSE: &str = "}";
const TEST_DECL: &str = "func test";

/// Association state between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    /// No block available for the next declaration
    #[default]
    Idle,
    /// Inside a comment block, collecting its lines
    Buffering(Vec<String>),
    /// A closed block waiting for a declaration
    HasPendingBlock(TestCase),
}

/// A classified test declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Documented(Test),
    Orphan(Test),
}

/// Tests found in one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileScan {
    pub documented: Vec<Test>,
    pub orphans: Vec<Test>,
}

impl FileScan {
    pub fn is_empty(&self) -> bool {
        self.documented.is_empty() && self.orphans.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Scanner {
    state: ScanState,
    line: usize,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Feed the next raw line. Returns a test if the line declared one.
    pub fn step(&mut self, raw: &str) -> Option<Classified> {
        self.line += 1;
        let text = raw.trim();

        if text.starts_with(BLOCK_OPEN) {
            self.state = ScanState::Buffering(vec![text.to_string()]);
            return None;
        }

        match std::mem::take(&mut self.state) {
            ScanState::Buffering(mut buf) => {
                buf.push(text.to_string());
                self.state = if text.ends_with(BLOCK_CLOSE) {
                    ScanState::HasPendingBlock(parse_block(&buf))
                } else {
                    ScanState::Buffering(buf)
                };
                None
            }
            // Pending association does not survive a closing scope.
            _ if text.starts_with(SCOPE_CLOSE) => None,
            pending if text.starts_with(TEST_DECL) => {
                let method = text.strip_suffix('{').unwrap_or(text).trim().to_string();
                let classified = match pending {
                    ScanState::HasPendingBlock(case) => Classified::Documented(Test {
                        method,
                        line: self.line,
                        block: Some(case),
                    }),
                    _ => Classified::Orphan(Test {
                        method,
                        line: self.line,
                        block: None,
                    }),
                };
                Some(classified)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Consume the scanner at end of input.
    pub fn finish(self) {
        if let ScanState::Buffering(buf) = self.state {
            debug!(
                lines = buf.len(),
                "dropping unterminated comment block at end of input"
            );
        }
    }
}

/// Scan all lines of one file.
pub fn scan_lines<I, S>(lines: I) -> FileScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    let mut scan = FileScan::default();
    for line in lines {
        match scanner.step(line.as_ref()) {
            Some(Classified::Documented(test)) => scan.documented.push(test),
            Some(Classified::Orphan(test)) => scan.orphans.push(test),
            None => {}
        }
    }
    scanner.finish();
    scan
}
