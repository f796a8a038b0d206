//! Data model for extracted test intents — format-agnostic.

use serde::{Serialize, Serializer};
use std::fmt;

/// Structured intent parsed from one comment block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub given: Vec<String>,
    pub when: Vec<String>,
    pub then: Vec<String>,
    pub tags: Vec<Tag>,
}

/// A `#key:value` tag. Bare `#value` tokens get the key `info`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub const DEFAULT_KEY: &'static str = "info";

    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a tag from a single token, `#` already stripped.
    ///
    /// Returns `None` for tokens with more than one `:`.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut parts = token.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(value), None, None) => Some(Tag::new(Self::DEFAULT_KEY, value)),
            (Some(key), Some(value), None) => Some(Tag::new(key, value)),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// A single test-function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Test {
    /// Declaration text up to the opening brace
    pub method: String,
    /// 1-based line of the declaration
    pub line: usize,
    /// `None` for orphans; written out as an empty block
    #[serde(serialize_with = "serialize_block")]
    pub block: Option<TestCase>,
}

impl Test {
    pub fn is_orphan(&self) -> bool {
        self.block.is_none()
    }

    pub fn tags(&self) -> &[Tag] {
        self.block.as_ref().map(|b| b.tags.as_slice()).unwrap_or(&[])
    }
}

fn serialize_block<S: Serializer>(block: &Option<TestCase>, s: S) -> Result<S::Ok, S::Error> {
    match block {
        Some(case) => case.serialize(s),
        None => TestCase::default().serialize(s),
    }
}

/// All tests of one category found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestData {
    pub filename: String,
    pub filepath: String,
    pub tests: Vec<Test>,
}

/// Result of scanning a whole tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub documented: Vec<TestData>,
    pub orphans: Vec<TestData>,
}

/// Counts printed after a scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub documented_files: usize,
    pub documented_tests: usize,
    pub orphan_files: usize,
    pub orphan_tests: usize,
}

impl Report {
    pub fn summary(&self) -> Summary {
        Summary {
            documented_files: self.documented.len(),
            documented_tests: self.documented.iter().map(|d| d.tests.len()).sum(),
            orphan_files: self.orphans.len(),
            orphan_tests: self.orphans.iter().map(|d| d.tests.len()).sum(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documented test(s) in {} file(s), {} orphan test(s) in {} file(s)",
            self.documented_tests, self.documented_files, self.orphan_tests, self.orphan_files
        )
    }
}
