//! Production rule definitions
//!
//! A grammar is a table of named rules. Each rule is one of three kinds:
//! a `Terminal` matching raw input against a pattern, a `Sequence`
//! requiring an ordered list of sub-rule references, or a `Choice` trying
//! ordered alternatives until one succeeds.
//!
//! Sequences reference sub-rules through `ItemRef`s, which pair the rule
//! name with a repetition `Quantifier`. The same named rule can therefore
//! be invoked `Once` from one sequence and `ZeroOrMore` from another.
//!
//! Tree shaping is split into two orthogonal knobs (see `Shape` and
//! `RuleEntry::suppressed`) so the assembly policy is an exhaustive match
//! instead of a pile of interacting booleans.

use super::pattern::Pattern;

/// Repetition applied to a single item reference inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Exactly one match; sub-rule failure fails the item.
    Once,
    /// Any number of matches, including none. Never fails.
    ZeroOrMore,
    /// At least one match, then as many more as possible.
    OneOrMore,
    /// One match if possible, otherwise succeed consuming nothing.
    ZeroOrOne,
}

/// A reference from a sequence to a named sub-rule, with its quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub name: String,
    pub quantifier: Quantifier,
}

impl ItemRef {
    pub fn new(name: impl Into<String>, quantifier: Quantifier) -> Self {
        Self {
            name: name.into(),
            quantifier,
        }
    }

    /// Parse the compact authoring form: a rule name with an optional
    /// trailing quantifier character (`NAME`, `NAME*`, `NAME+`, `NAME?`).
    pub fn parse(spec: &str) -> Self {
        match spec.as_bytes().last() {
            Some(b'*') => Self::new(&spec[..spec.len() - 1], Quantifier::ZeroOrMore),
            Some(b'+') => Self::new(&spec[..spec.len() - 1], Quantifier::OneOrMore),
            Some(b'?') => Self::new(&spec[..spec.len() - 1], Quantifier::ZeroOrOne),
            _ => Self::new(spec, Quantifier::Once),
        }
    }
}

/// How a successful sequence shapes its retained children into a node.
///
/// Applied after suppression filtering, in this priority order:
/// `Expose` always wins, `Collapse` applies only when exactly one child
/// remains, and `Wrap` is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Wrap all retained children in a node labeled with the rule's name.
    Wrap,
    /// With exactly one retained child, return that child unchanged;
    /// otherwise wrap normally. Avoids single-child wrapper nodes for
    /// "delimiter + item" helper rules.
    Collapse,
    /// Re-label the result under the given field name, flattening the
    /// retained children down to that field's values. Turns
    /// delimiter-separated repetitions into plain lists.
    Expose(String),
}

/// One production rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Matches input text directly against an anchored pattern.
    Terminal(Pattern),
    /// All items must match, in order, at consecutive offsets.
    Sequence { items: Vec<ItemRef>, shape: Shape },
    /// Ordered alternatives; the first to match wins, and no alternative
    /// is tried after a success.
    Choice(Vec<String>),
}

/// A rule plus its suppression flag, as stored in the grammar table.
///
/// Suppression is orthogonal to the rule kind: a suppressed rule's match
/// consumes input but contributes nothing to its parent's children.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub rule: Rule,
    pub suppressed: bool,
}

impl RuleEntry {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            suppressed: false,
        }
    }

    pub fn suppressed(mut self) -> Self {
        self.suppressed = true;
        self
    }
}
