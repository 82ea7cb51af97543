/* 📖 # How is the search text matched against titles?

Matching is an unanchored, case-insensitive "title contains the query" test.

In `literal` mode (the default) the query is plain text: `(500) Days` finds the
title with the parentheses in it. In `pattern` mode the query is compiled as a
regular expression. If it does not compile (`(`, `[a-`, a pattern over the size
budget), the PatternCompile error is logged and the query is matched as literal
text instead. The error never reaches the caller.

The regex crate runs in linear time, so no user input can make matching backtrack
catastrophically; the size limit bounds compile cost.
*/

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;

use cinefacet_base::{CatalogError, CatalogResult, ErrorKind};

/// Default budget for a compiled search pattern, in bytes.
pub const DEFAULT_PATTERN_SIZE_LIMIT: usize = 64 * 1024;

/// How search text is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Literal,
    Pattern,
}

impl std::str::FromStr for SearchMode {
    type Err = Box<CatalogError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(SearchMode::Literal),
            "pattern" | "regex" => Ok(SearchMode::Pattern),
            _ => Err(cinefacet_base::err!(
                "Unknown search mode '{}' (expected literal or pattern)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherOptions {
    pub mode: SearchMode,
    pub pattern_size_limit: usize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            mode: SearchMode::Literal,
            pattern_size_limit: DEFAULT_PATTERN_SIZE_LIMIT,
        }
    }
}

/// Compiled form of the search text.
#[derive(Debug, Clone)]
pub enum TitleMatcher {
    /// Lowercased needle for substring search.
    Literal(String),
    Pattern(Regex),
}

impl TitleMatcher {
    /// Build a matcher for `search_text`, or `None` when the text is empty.
    pub fn new(search_text: &str, options: &MatcherOptions) -> Option<Self> {
        if search_text.is_empty() {
            return None;
        }
        let matcher = match options.mode {
            SearchMode::Literal => Self::literal(search_text),
            SearchMode::Pattern => match compile_pattern(search_text, options.pattern_size_limit) {
                Ok(regex) => TitleMatcher::Pattern(regex),
                Err(e) => {
                    debug!(error = %e, "falling back to literal title match");
                    Self::literal(search_text)
                }
            },
        };
        Some(matcher)
    }

    fn literal(search_text: &str) -> Self {
        TitleMatcher::Literal(search_text.to_lowercase())
    }

    pub fn is_match(&self, title: &str) -> bool {
        match self {
            TitleMatcher::Literal(needle) => title.to_lowercase().contains(needle.as_str()),
            TitleMatcher::Pattern(regex) => regex.is_match(title),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TitleMatcher::Literal(_))
    }
}

/// Compile a case-insensitive pattern within the given size budget.
pub fn compile_pattern(pattern: &str, size_limit: usize) -> CatalogResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
        .map_err(|e| {
            Box::new(CatalogError::new(ErrorKind::PatternCompile {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }))
        })
}
