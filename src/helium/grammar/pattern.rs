//! Terminal pattern matching
//!
//! A `Pattern` is a compiled regular expression anchored to the current
//! parse offset: it either matches a prefix of the remaining input or it
//! does not. It never searches ahead, so a failed match is a cheap,
//! ordinary outcome that Choice and Sequence evaluation can react to.
//!
//! Patterns are compiled once, when the grammar is built, and reused by
//! every parse that shares the grammar.

use regex::Regex;

/// A terminal matcher anchored at the parse offset.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from regex syntax.
    ///
    /// The pattern is wrapped in `^(?:...)` so that matching is anchored
    /// at the offset it is attempted at. The full `regex` crate syntax is
    /// available inside: literals, character classes, alternation groups,
    /// and repetition.
    pub fn compile(raw: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{raw})"))?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// The pattern source as written in the grammar.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Attempt to match a prefix of `input` starting exactly at `offset`.
    ///
    /// Returns the matched substring, which may be empty for zero-width
    /// patterns such as the `^` / `$` input anchors. Returns `None` when
    /// the pattern does not apply at this offset.
    pub fn match_at<'i>(&self, input: &'i str, offset: usize) -> Option<&'i str> {
        self.regex.find(&input[offset..]).map(|m| m.as_str())
    }
}
