//! Literal substring matching with optional case folding.

use std::borrow::Cow;

use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::{CoreError, CoreResult};

/// Matches a literal needle, case-sensitively or not.
///
/// An empty needle matches nothing.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    regex: Option<Regex>,
}

impl TextMatcher {
    pub fn new(needle: &str, match_case: bool) -> CoreResult<Self> {
        if needle.is_empty() {
            return Ok(TextMatcher { regex: None });
        }
        let regex = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(!match_case)
            .build()
            .map_err(|e| CoreError::InvalidPattern {
                pattern: needle.to_string(),
                message: e.to_string(),
            })?;
        Ok(TextMatcher { regex: Some(regex) })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(haystack))
    }

    /// Replace every occurrence with `replacement` taken literally.
    pub fn replace_all<'h>(&self, haystack: &'h str, replacement: &str) -> Cow<'h, str> {
        match &self.regex {
            Some(regex) => regex.replace_all(haystack, NoExpand(replacement)),
            None => Cow::Borrowed(haystack),
        }
    }
}
