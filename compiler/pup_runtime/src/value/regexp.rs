//! Compiled regular expressions.

use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::errors::{invalid_regex, EvalError};

/// A regular expression: its source text plus the compiled matcher.
///
/// Identity is the source text. Cloning is cheap; the compiled program is
/// reference counted inside `regex`.
#[derive(Clone)]
pub struct RegexValue {
    source: String,
    regex: Regex,
}

impl RegexValue {
    /// Compile `source`, failing with a syntax error on a malformed pattern.
    pub fn new(source: impl Into<String>) -> Result<Self, EvalError> {
        let source = source.into();
        match Regex::new(&source) {
            Ok(regex) => Ok(RegexValue { source, regex }),
            Err(err) => Err(invalid_regex(&source, &err)),
        }
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled matcher.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether this pattern matches anything and everything without searching.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl PartialEq for RegexValue {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for RegexValue {}

impl Hash for RegexValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl fmt::Debug for RegexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

impl fmt::Display for RegexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}
