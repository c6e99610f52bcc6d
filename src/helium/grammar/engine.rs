//! Grammar table and recursive-descent evaluator
//!
//! A `Grammar` is an immutable table of named rules plus a designated
//! start rule. Rule references are resolved through the table by name at
//! match time; rules carry no back-pointers, so the table has no cycles
//! and can be shared read-only across any number of concurrent parses.
//!
//! Evaluation threads the input offset through return values only. There
//! is no parse cursor: a rule is handed an offset, and on success reports
//! the offset it consumed up to. Failure to match (`Outcome::NoMatch`) is
//! an ordinary value so Choice can try the next alternative and the
//! quantifier loops can stop, without any unwinding. `Err` is reserved
//! for structural grammar defects.
//!
//! Repetition is greedy PEG-style: once a repetition's next attempt
//! fails, the offset of the previous success is kept and the loop stops.
//! Nothing ever backtracks into an earlier success.

use std::collections::HashMap;

use super::error::ParseError;
use super::node::{NodeValue, SyntaxNode};
use super::pattern::Pattern;
use super::rule::{ItemRef, Quantifier, Rule, RuleEntry, Shape};

/// The outcome of attempting a rule at an offset.
///
/// `nodes` holds the retained result of the match: one shaped node for an
/// ordinary rule, or nothing when the rule is suppressed. Suppression
/// therefore propagates through Choice to an enclosing Sequence simply by
/// contributing an empty list.
#[derive(Debug)]
enum Outcome {
    Match { end: usize, nodes: Vec<SyntaxNode> },
    NoMatch,
}

/// An immutable table of named production rules with a start rule.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<String, RuleEntry>,
    start: String,
}

impl Grammar {
    /// Build a grammar from `(name, rule)` entries in one step.
    ///
    /// Every rule name referenced by a Sequence item or Choice
    /// alternative is validated against the table here, eagerly, so a
    /// dangling reference fails before any input is parsed. A duplicate
    /// name keeps the last entry, matching declarative-table overriding.
    pub fn new(
        start: impl Into<String>,
        entries: Vec<(String, RuleEntry)>,
    ) -> Result<Self, ParseError> {
        let mut rules = HashMap::with_capacity(entries.len());
        for (name, entry) in entries {
            rules.insert(name, entry);
        }

        for (name, entry) in &rules {
            let referenced: Vec<&String> = match &entry.rule {
                Rule::Terminal(_) => continue,
                Rule::Sequence { items, .. } => items.iter().map(|item| &item.name).collect(),
                Rule::Choice(alternatives) => alternatives.iter().collect(),
            };
            for sub_rule in referenced {
                if !rules.contains_key(sub_rule) {
                    return Err(ParseError::UnknownRule {
                        rule: sub_rule.clone(),
                        referenced_by: Some(name.clone()),
                    });
                }
            }
        }

        Ok(Self {
            rules,
            start: start.into(),
        })
    }

    /// The name of the designated start rule.
    pub fn start_rule(&self) -> &str {
        &self.start
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    /// Parse `input` from the start rule. See [`Grammar::parse_rule`].
    pub fn parse(&self, input: &str) -> Result<SyntaxNode, ParseError> {
        self.parse_rule(input, &self.start)
    }

    /// Parse `input` starting from the named rule.
    ///
    /// Succeeds only when the rule matches and consumes the entire input:
    /// a match that stops early is reported as `Incomplete`, distinctly
    /// from `NoMatch`. An unknown start rule is `UnknownRule`.
    pub fn parse_rule(&self, input: &str, start: &str) -> Result<SyntaxNode, ParseError> {
        let entry = self.entry(start, None)?;
        let mut matcher = Matcher {
            grammar: self,
            input,
            furthest: 0,
        };
        match matcher.eval(start, entry, 0)? {
            Outcome::NoMatch => Err(ParseError::NoMatch {
                rule: start.to_string(),
                offset: matcher.furthest,
            }),
            Outcome::Match { end, mut nodes } => {
                if end < input.len() {
                    return Err(ParseError::Incomplete { offset: end });
                }
                if nodes.len() == 1 {
                    Ok(nodes.remove(0))
                } else {
                    Ok(SyntaxNode::list(start, nodes))
                }
            }
        }
    }

    fn entry(&self, name: &str, referenced_by: Option<&str>) -> Result<&RuleEntry, ParseError> {
        self.rules.get(name).ok_or_else(|| ParseError::UnknownRule {
            rule: name.to_string(),
            referenced_by: referenced_by.map(str::to_string),
        })
    }
}

/// One parse in progress: the shared grammar, the input, and a high-water
/// mark of the furthest offset any terminal attempt reached, used to
/// report where a failing parse got stuck.
struct Matcher<'a> {
    grammar: &'a Grammar,
    input: &'a str,
    furthest: usize,
}

impl Matcher<'_> {
    fn eval(&mut self, name: &str, entry: &RuleEntry, offset: usize) -> Result<Outcome, ParseError> {
        let outcome = match &entry.rule {
            Rule::Terminal(pattern) => self.eval_terminal(name, pattern, offset),
            Rule::Sequence { items, shape } => self.eval_sequence(name, items, shape, offset)?,
            Rule::Choice(alternatives) => self.eval_choice(name, alternatives, offset)?,
        };
        // A suppressed rule consumes input but contributes no node.
        Ok(match outcome {
            Outcome::Match { end, .. } if entry.suppressed => Outcome::Match {
                end,
                nodes: Vec::new(),
            },
            other => other,
        })
    }

    fn eval_terminal(&mut self, name: &str, pattern: &Pattern, offset: usize) -> Outcome {
        self.furthest = self.furthest.max(offset);
        match pattern.match_at(self.input, offset) {
            Some(text) => {
                let end = offset + text.len();
                self.furthest = self.furthest.max(end);
                Outcome::Match {
                    end,
                    nodes: vec![SyntaxNode::leaf(name, text)],
                }
            }
            None => Outcome::NoMatch,
        }
    }

    /// All items must match in declared order; the first failure aborts
    /// the whole sequence with no partial result and no backtracking.
    fn eval_sequence(
        &mut self,
        name: &str,
        items: &[ItemRef],
        shape: &Shape,
        offset: usize,
    ) -> Result<Outcome, ParseError> {
        let mut pos = offset;
        let mut children = Vec::new();
        for item in items {
            match self.eval_quantified(name, item, pos)? {
                Outcome::NoMatch => return Ok(Outcome::NoMatch),
                Outcome::Match { end, nodes } => {
                    pos = end;
                    children.extend(nodes);
                }
            }
        }
        Ok(Outcome::Match {
            end: pos,
            nodes: vec![shape_sequence(name, shape, children)],
        })
    }

    /// Try alternatives in declared order at the same offset; the first
    /// success wins and is re-labeled to the choice's own name. A
    /// suppressed winning alternative stays suppressed (empty `nodes`).
    fn eval_choice(
        &mut self,
        name: &str,
        alternatives: &[String],
        offset: usize,
    ) -> Result<Outcome, ParseError> {
        for alternative in alternatives {
            let entry = self.grammar.entry(alternative, Some(name))?;
            match self.eval(alternative, entry, offset)? {
                Outcome::Match { end, mut nodes } => {
                    if nodes.len() == 1 {
                        let node = nodes.remove(0).relabeled(name);
                        nodes.push(node);
                    }
                    return Ok(Outcome::Match { end, nodes });
                }
                Outcome::NoMatch => continue,
            }
        }
        Ok(Outcome::NoMatch)
    }

    /// Apply an item's quantifier by repeatedly attempting its sub-rule.
    fn eval_quantified(
        &mut self,
        sequence: &str,
        item: &ItemRef,
        offset: usize,
    ) -> Result<Outcome, ParseError> {
        let entry = self.grammar.entry(&item.name, Some(sequence))?;
        match item.quantifier {
            Quantifier::Once => self.eval(&item.name, entry, offset),
            Quantifier::ZeroOrOne => Ok(match self.eval(&item.name, entry, offset)? {
                matched @ Outcome::Match { .. } => matched,
                Outcome::NoMatch => Outcome::Match {
                    end: offset,
                    nodes: Vec::new(),
                },
            }),
            Quantifier::ZeroOrMore => self.eval_repeated(&item.name, entry, offset, 0),
            Quantifier::OneOrMore => self.eval_repeated(&item.name, entry, offset, 1),
        }
    }

    /// Greedy repetition loop shared by `ZeroOrMore` and `OneOrMore`.
    ///
    /// A zero-width match is recorded once and ends the loop, so a
    /// sub-rule that can match empty input cannot spin forever.
    fn eval_repeated(
        &mut self,
        name: &str,
        entry: &RuleEntry,
        offset: usize,
        min: usize,
    ) -> Result<Outcome, ParseError> {
        let mut pos = offset;
        let mut nodes = Vec::new();
        let mut count = 0usize;
        loop {
            match self.eval(name, entry, pos)? {
                Outcome::NoMatch => break,
                Outcome::Match { end, nodes: matched } => {
                    nodes.extend(matched);
                    count += 1;
                    if end == pos {
                        break;
                    }
                    pos = end;
                }
            }
        }
        if count < min {
            return Ok(Outcome::NoMatch);
        }
        Ok(Outcome::Match { end: pos, nodes })
    }
}

/// Shape a successful sequence's retained children into its result node.
fn shape_sequence(name: &str, shape: &Shape, mut children: Vec<SyntaxNode>) -> SyntaxNode {
    match shape {
        Shape::Expose(field) => expose(field, children),
        Shape::Collapse if children.len() == 1 => children.remove(0),
        Shape::Collapse | Shape::Wrap => SyntaxNode::list(name, children),
    }
}

/// Apply `Shape::Expose`: with exactly one retained child, return that
/// value re-labeled under the field name; otherwise gather the field's
/// values out of the children (descending through wrapper nodes) into one
/// flat list labeled with the field name.
fn expose(field: &str, mut children: Vec<SyntaxNode>) -> SyntaxNode {
    if children.len() == 1 {
        return children.remove(0).relabeled(field);
    }
    let mut flat = Vec::new();
    for child in children {
        collect_exposed(field, child, &mut flat);
    }
    SyntaxNode::list(field, flat)
}

fn collect_exposed(field: &str, node: SyntaxNode, into: &mut Vec<SyntaxNode>) {
    if node.label() == field {
        into.push(node);
        return;
    }
    // Descend into wrapper nodes; leaves under other labels are
    // delimiters the grammar chose not to suppress and carry no field
    // value to expose.
    if let NodeValue::List(nested) = node.into_value() {
        for child in nested {
            collect_exposed(field, child, into);
        }
    }
}
