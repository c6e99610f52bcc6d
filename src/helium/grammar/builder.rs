//! Fluent grammar construction
//!
//! `GrammarBuilder` is the authoring surface for grammars: chainable
//! methods declare terminals, sequences, and choices, and separate flag
//! methods attach the tree-shaping policy (`suppress`, `collapse`,
//! `expose`). Flags may be declared before or after the rule they name.
//!
//! `build()` does all the up-front work in one step: terminal patterns
//! are compiled once, shaping flags are attached, and every sub-rule
//! reference is validated against the table, so a defective grammar
//! fails here rather than mid-parse.
//!
//! Sequence items use the compact reference form with an optional
//! trailing quantifier: `"VALUE"`, `"TAIL*"`, `"TAIL+"`, `"TYPEDECL?"`.

use std::collections::{HashMap, HashSet};

use super::engine::Grammar;
use super::error::ParseError;
use super::pattern::Pattern;
use super::rule::{ItemRef, Rule, RuleEntry, Shape};

/// Raw rule definitions collected before compilation.
#[derive(Debug, Clone)]
enum Def {
    Terminal(String),
    Sequence(Vec<ItemRef>),
    Choice(Vec<String>),
}

/// Collects rule declarations and shaping flags, then builds a `Grammar`.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    start: String,
    defs: Vec<(String, Def)>,
    suppressed: HashSet<String>,
    collapsed: HashSet<String>,
    exposed: HashMap<String, String>,
}

impl GrammarBuilder {
    /// Start a grammar with the given start-rule name.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            defs: Vec::new(),
            suppressed: HashSet::new(),
            collapsed: HashSet::new(),
            exposed: HashMap::new(),
        }
    }

    /// Declare a terminal rule matching `pattern` (regex syntax, anchored
    /// at the parse offset).
    pub fn terminal(mut self, name: &str, pattern: &str) -> Self {
        self.defs
            .push((name.to_string(), Def::Terminal(pattern.to_string())));
        self
    }

    /// Declare a sequence rule from item references in the compact form
    /// (`"NAME"` with an optional `*`, `+`, or `?` quantifier suffix).
    pub fn sequence(mut self, name: &str, items: &[&str]) -> Self {
        let items = items.iter().map(|spec| ItemRef::parse(spec)).collect();
        self.defs.push((name.to_string(), Def::Sequence(items)));
        self
    }

    /// Declare an ordered-choice rule over the named alternatives.
    pub fn choice(mut self, name: &str, alternatives: &[&str]) -> Self {
        let alternatives = alternatives.iter().map(|alt| alt.to_string()).collect();
        self.defs.push((name.to_string(), Def::Choice(alternatives)));
        self
    }

    /// Mark a rule as suppressed: its match is consumed but contributes
    /// nothing to the parent's children. Typical for delimiters.
    pub fn suppress(mut self, name: &str) -> Self {
        self.suppressed.insert(name.to_string());
        self
    }

    /// Mark a sequence as collapsible: a single retained child is
    /// returned directly instead of being wrapped. Ignored for terminals
    /// and choices, which never wrap their result.
    pub fn collapse(mut self, name: &str) -> Self {
        self.collapsed.insert(name.to_string());
        self
    }

    /// Re-label a sequence's result under `field`, flattening the
    /// retained children down to that field's values. `expose` takes
    /// precedence over `collapse` when both are set.
    pub fn expose(mut self, name: &str, field: &str) -> Self {
        self.exposed.insert(name.to_string(), field.to_string());
        self
    }

    /// Compile patterns, attach flags, validate references, and build
    /// the immutable grammar.
    pub fn build(self) -> Result<Grammar, ParseError> {
        let mut entries = Vec::with_capacity(self.defs.len());
        for (name, def) in self.defs {
            let rule = match def {
                Def::Terminal(pattern) => {
                    let compiled =
                        Pattern::compile(&pattern).map_err(|source| ParseError::InvalidPattern {
                            rule: name.clone(),
                            source,
                        })?;
                    Rule::Terminal(compiled)
                }
                Def::Sequence(items) => Rule::Sequence {
                    items,
                    shape: match self.exposed.get(&name) {
                        Some(field) => Shape::Expose(field.clone()),
                        None if self.collapsed.contains(&name) => Shape::Collapse,
                        None => Shape::Wrap,
                    },
                },
                Def::Choice(alternatives) => Rule::Choice(alternatives),
            };
            let mut entry = RuleEntry::new(rule);
            if self.suppressed.contains(&name) {
                entry = entry.suppressed();
            }
            entries.push((name, entry));
        }
        Grammar::new(self.start, entries)
    }
}
