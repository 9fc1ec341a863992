//! Compiled heading patterns and fixed selectors used by the field extractors.
//!
//! Section headings are matched case-insensitively against the heading's
//! trimmed text, so a heading such as "Uses of Dolo 650 Tablet" is found by
//! [`USES_OF`] whatever the product name.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

/// "How to use ..." section; feeds `features`, `direction_of_use` and `dosage`.
pub static HOW_TO_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)how to use .*").expect("HOW_TO_USE regex"));

/// "Uses of ..." section.
pub static USES_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)uses of .*").expect("USES_OF regex"));

/// Any heading mentioning safety advice.
pub static SAFETY_ADVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i).*safety advice.*").expect("SAFETY_ADVICE regex"));

/// The introduction heading must match exactly.
pub static INTRODUCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Introduction$").expect("INTRODUCTION regex"));

pub static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("LIST_ITEM selector"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_patterns() {
        assert!(HOW_TO_USE.is_match("How to use Dolo 650 Tablet"));
        assert!(USES_OF.is_match("USES OF Crocin Advance"));
        assert!(SAFETY_ADVICE.is_match("Safety advice"));
        assert!(SAFETY_ADVICE.is_match("Important safety advice for you"));
        assert!(INTRODUCTION.is_match("Introduction"));

        assert!(!USES_OF.is_match("Side effects of Dolo 650"));
        assert!(!INTRODUCTION.is_match("Introduction to Dolo"));
        assert!(!HOW_TO_USE.is_match("How it works"));
    }
}
