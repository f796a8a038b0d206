//! Given/When/Then comment grammar.
//!
//! A block looks like:
//!
//! ```text
//! /*
//! GIVEN
//! - a user is logged in
//! WHEN
//! - they tap logout
//! THEN
//! - they see the login screen
//! #smoke #team:ios
//! */
//! ```
//!
//! Parsing is best-effort: unrecognized lines are dropped, never reported.

use crate::model::{Tag, TestCase};

const OPEN: &str = "/*";
const CLOSE: &str = "*/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Given,
    When,
    Then,
}

impl Section {
    fn from_keyword(line: &str) -> Option<Self> {
        if line.starts_with("GIVEN") {
            Some(Section::Given)
        } else if line.starts_with("WHEN") {
            Some(Section::When)
        } else if line.starts_with("THEN") {
            Some(Section::Then)
        } else {
            None
        }
    }

    fn items<'a>(&self, case: &'a mut TestCase) -> &'a mut Vec<String> {
        match self {
            Section::Given => &mut case.given,
            Section::When => &mut case.when,
            Section::Then => &mut case.then,
        }
    }
}

/// Parse the lines of one comment block, delimiters included.
pub fn parse_block<S: AsRef<str>>(lines: &[S]) -> TestCase {
    let (_, case) = lines.iter().fold(
        (None, TestCase::default()),
        |(current, mut case), line| {
            let current = apply_line(current, &mut case, line.as_ref().trim());
            (current, case)
        },
    );
    case
}

/// Apply one line; returns the section in effect afterwards.
fn apply_line(current: Option<Section>, case: &mut TestCase, line: &str) -> Option<Section> {
    if line.starts_with(OPEN) || line.starts_with(CLOSE) {
        return current;
    }

    if let Some(section) = Section::from_keyword(line) {
        return Some(section);
    }

    if line.starts_with('#') {
        case.tags.extend(parse_tag_line(line));
        return current;
    }

    if let Some(item) = line.strip_prefix('-') {
        if let Some(section) = current {
            section.items(case).push(item.trim().to_string());
        }
    }

    current
}

/// Split a tag line on spaces into tags. Tokens with 2+ colons yield nothing.
pub fn parse_tag_line(line: &str) -> impl Iterator<Item = Tag> + '_ {
    line.split(' ')
        .filter(|token| !token.is_empty())
        .filter_map(|token| Tag::from_token(token.strip_prefix('#').unwrap_or(token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(body: &str) -> Vec<String> {
        let mut lines = vec!["/*".to_string()];
        lines.extend(body.lines().map(str::to_string));
        lines.push("*/".to_string());
        lines
    }

    #[test]
    fn parse_full_block() {
        let case = parse_block(&block("GIVEN\n- x\nWHEN\n- y\nTHEN\n- z\n#tag:val"));
        assert_eq!(case.given, vec!["x"]);
        assert_eq!(case.when, vec!["y"]);
        assert_eq!(case.then, vec!["z"]);
        assert_eq!(case.tags, vec![Tag::new("tag", "val")]);
    }

    #[test]
    fn bullets_without_section_dropped() {
        let case = parse_block(&block("- orphan bullet\n- another\n#smoke"));
        assert!(case.given.is_empty());
        assert!(case.when.is_empty());
        assert!(case.then.is_empty());
        assert_eq!(case.tags, vec![Tag::new("info", "smoke")]);
    }

    #[test]
    fn multiple_items_keep_order() {
        let case = parse_block(&block("GIVEN\n- first\n-second\n  -   third  "));
        assert_eq!(case.given, vec!["first", "second", "third"]);
    }

    #[test]
    fn keyword_line_content_ignored() {
        let case = parse_block(&block("GIVEN a logged in user\n- x"));
        assert_eq!(case.given, vec!["x"]);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let case = parse_block(&block("Given\n- x"));
        assert!(case.given.is_empty());
    }

    #[test]
    fn tag_line_does_not_change_section() {
        let case = parse_block(&block("WHEN\n- a\n#flaky\n- b"));
        assert_eq!(case.when, vec!["a", "b"]);
    }

    #[test]
    fn tag_line_mixed_tokens() {
        let case = parse_block(&block("#smoke #team:ios #a:b:c module:login"));
        assert_eq!(
            case.tags,
            vec![
                Tag::new("info", "smoke"),
                Tag::new("team", "ios"),
                Tag::new("module", "login"),
            ]
        );
    }

    #[test]
    fn repeated_spaces_in_tag_line() {
        let case = parse_block(&block("#a  #b"));
        assert_eq!(case.tags, vec![Tag::new("info", "a"), Tag::new("info", "b")]);
    }

    #[test]
    fn free_text_ignored() {
        let case = parse_block(&block("THEN\nsome prose\n* star item\n- kept"));
        assert_eq!(case.then, vec!["kept"]);
    }

    #[test]
    fn closing_prefix_line_skipped() {
        let case = parse_block(&["/*", "GIVEN", "- x", "*/ trailing"]);
        assert_eq!(case.given, vec!["x"]);
    }

    #[test]
    fn empty_block() {
        assert_eq!(parse_block(&["/*", "*/"]), TestCase::default());
    }
}
