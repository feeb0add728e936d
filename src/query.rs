//! Caller-side translation of a raw query into a compiled pattern.
//!
//! The engine only ever consumes a pre-compiled [`Regex`]; this module is
//! the glue the CLI uses to produce one. In literal mode every regex
//! meta-character is escaped and space-separated terms become alternatives,
//! so `foo bar` finds lines containing either word.

use crate::error::Result;
use regex::{Regex, RegexBuilder};

const META_CHARS: &str = ".^${}[]*+?|()\\";

/// Escape regex meta-characters so the query matches literally.
pub fn escape_meta_chars(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if META_CHARS.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Turn space-separated terms into a grouped alternation. Queries without
/// spaces pass through untouched.
pub fn convert_or_pattern(query: &str) -> String {
    if query.contains(' ') {
        format!("({})", query.replace(' ', "|"))
    } else {
        query.to_string()
    }
}

/// Compile `query` into the pattern the engine consumes.
///
/// In regex mode the query is compiled as written; otherwise it goes through
/// meta-character escaping and OR expansion first. `ignore_case` applies in
/// both modes.
pub fn build_pattern(query: &str, regex_mode: bool, ignore_case: bool) -> Result<Regex> {
    let text = if regex_mode {
        query.to_string()
    } else {
        convert_or_pattern(&escape_meta_chars(query))
    };
    let pattern = RegexBuilder::new(&text)
        .case_insensitive(ignore_case)
        .multi_line(true)
        .build()?;
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_meta_character() {
        assert_eq!(escape_meta_chars("a.b*c"), r"a\.b\*c");
        assert_eq!(escape_meta_chars(r"x\y"), r"x\\y");
        assert_eq!(escape_meta_chars("(){}[]"), r"\(\)\{\}\[\]");
        assert_eq!(escape_meta_chars("plain"), "plain");
    }

    #[test]
    fn spaces_become_alternation() {
        assert_eq!(convert_or_pattern("foo bar"), "(foo|bar)");
        assert_eq!(convert_or_pattern("solo"), "solo");
    }

    #[test]
    fn literal_mode_matches_meta_characters_verbatim() {
        let pattern = build_pattern("a.b", false, false).unwrap();
        assert!(pattern.is_match("a.b"));
        assert!(!pattern.is_match("aXb"));
    }

    #[test]
    fn literal_mode_or_expansion_matches_either_term() {
        let pattern = build_pattern("cat dog", false, false).unwrap();
        assert!(pattern.is_match("hot dog stand"));
        assert!(pattern.is_match("a cat sat"));
        assert!(!pattern.is_match("parrot"));
    }

    #[test]
    fn ignore_case_applies_to_literal_queries() {
        let pattern = build_pattern("Needle", false, true).unwrap();
        assert!(pattern.is_match("found a needle here"));
        assert!(pattern.is_match("NEEDLE"));
    }

    #[test]
    fn regex_mode_compiles_as_written() {
        let pattern = build_pattern(r"nee+dle", true, false).unwrap();
        assert!(pattern.is_match("neeeedle"));
        assert!(build_pattern("(unclosed", true, false).is_err());
    }
}
