//! Tag-based selection of documented tests.

use crate::model::{Tag, TestData};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Key order of the tag index. Unlisted keys sort ahead of these.
const KEY_PRIORITY: &[&str] = &["team", "module", Tag::DEFAULT_KEY];

/// A parsed `--filter` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    Include(Tag),
    Exclude(Tag),
}

impl TagFilter {
    /// Parse `tag`, `key:value`, or either prefixed with `!` to exclude.
    /// A leading `#` is accepted and ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let (exclude, rest) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let rest = rest.strip_prefix('#').unwrap_or(rest);
        if rest.is_empty() {
            return None;
        }
        let tag = Tag::from_token(rest)?;
        Some(if exclude {
            TagFilter::Exclude(tag)
        } else {
            TagFilter::Include(tag)
        })
    }

    fn admits(&self, tags: &[Tag]) -> bool {
        match self {
            TagFilter::Include(tag) => tags.contains(tag),
            TagFilter::Exclude(tag) => !tags.contains(tag),
        }
    }
}

/// Keep only tests admitted by every filter. Files left empty are removed.
pub fn apply(files: &mut Vec<TestData>, filters: &[TagFilter]) {
    if filters.is_empty() {
        return;
    }
    for file in files.iter_mut() {
        file.tests
            .retain(|test| filters.iter().all(|f| f.admits(test.tags())));
    }
    files.retain(|file| !file.tests.is_empty());
}

/// Unique tags across `files`, ordered by key priority then value.
///
/// Tags with equal rank and value keep their first-seen order.
pub fn tag_index(files: &[TestData]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    let mut tags: Vec<Tag> = files
        .iter()
        .flat_map(|file| file.tests.iter())
        .flat_map(|test| test.tags().iter())
        .filter(|tag| seen.insert((*tag).clone()))
        .cloned()
        .collect();
    tags.sort_by(compare_tags);
    tags
}

/// `None` for unlisted keys, which orders before every listed one.
fn key_rank(key: &str) -> Option<usize> {
    KEY_PRIORITY.iter().position(|k| *k == key)
}

fn compare_tags(a: &Tag, b: &Tag) -> Ordering {
    key_rank(&a.key)
        .cmp(&key_rank(&b.key))
        .then_with(|| a.value.cmp(&b.value))
}
