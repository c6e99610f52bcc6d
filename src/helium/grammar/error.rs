//! Error types for grammar construction and parsing
//!
//! Three kinds of failure stay distinguishable end to end:
//!
//! - `UnknownRule` and `InvalidPattern` are structural grammar defects,
//!   surfaced eagerly when the grammar is built (or, for an unknown start
//!   rule, when a parse is requested). They indicate a configuration
//!   error, not bad input.
//! - `NoMatch` means the input simply does not match the grammar. Inside
//!   the evaluator this is an ordinary value, never an error; it only
//!   becomes a `ParseError` when the top-level parse fails outright.
//! - `Incomplete` means the start rule matched a strict prefix of the
//!   input, which is reported separately so "does not match at all" and
//!   "matches only a prefix" read differently to the user.

use std::fmt;

/// Failures produced by grammar construction and by `Grammar::parse`.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// A rule name was referenced but never defined.
    UnknownRule {
        rule: String,
        /// The sequence or choice that referenced it, when known.
        referenced_by: Option<String>,
    },
    /// A terminal pattern failed to compile.
    InvalidPattern {
        rule: String,
        source: regex::Error,
    },
    /// The start rule did not match the input at all.
    NoMatch {
        rule: String,
        /// The furthest byte offset any terminal attempt reached.
        offset: usize,
    },
    /// The start rule matched, but stopped before the end of the input.
    Incomplete {
        /// Byte offset where matching stopped.
        offset: usize,
    },
}

impl ParseError {
    /// True for defects in the grammar itself, as opposed to input that
    /// fails to parse. The driver treats these as internal errors.
    pub fn is_grammar_defect(&self) -> bool {
        matches!(
            self,
            ParseError::UnknownRule { .. } | ParseError::InvalidPattern { .. }
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownRule {
                rule,
                referenced_by: Some(parent),
            } => write!(
                f,
                "rule \"{}\" is invalid: sub-rule \"{}\" does not exist",
                parent, rule
            ),
            ParseError::UnknownRule {
                rule,
                referenced_by: None,
            } => write!(f, "\"{}\" is not a production rule", rule),
            ParseError::InvalidPattern { rule, source } => {
                write!(f, "terminal \"{}\" has an invalid pattern: {}", rule, source)
            }
            ParseError::NoMatch { rule, offset } => write!(
                f,
                "input does not match rule \"{}\" (got as far as offset {})",
                rule, offset
            ),
            ParseError::Incomplete { offset } => write!(
                f,
                "input matches only a prefix; unconsumed input starts at offset {}",
                offset
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rule_message_names_the_referencing_rule() {
        let err = ParseError::UnknownRule {
            rule: "TYPEVALX".to_string(),
            referenced_by: Some("TYPEARGS".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "rule \"TYPEARGS\" is invalid: sub-rule \"TYPEVALX\" does not exist"
        );
    }

    #[test]
    fn test_failure_kinds_are_distinguishable() {
        let no_match = ParseError::NoMatch {
            rule: "FILE".to_string(),
            offset: 3,
        };
        let incomplete = ParseError::Incomplete { offset: 7 };

        assert!(!no_match.is_grammar_defect());
        assert!(!incomplete.is_grammar_defect());
        assert!(ParseError::UnknownRule {
            rule: "X".to_string(),
            referenced_by: None,
        }
        .is_grammar_defect());
        assert!(no_match.to_string().contains("offset 3"));
        assert!(incomplete.to_string().contains("offset 7"));
    }
}
