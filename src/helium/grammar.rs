//! Declarative grammar engine
//!
//! A grammar is an immutable table of named production rules - terminals
//! matched by anchored patterns, sequences of quantified sub-rule
//! references, and ordered choices - interpreted by a recursive-descent
//! evaluator that produces a labeled syntax tree from an input string.
//!
//! The engine is grammar-agnostic: the concrete Helium grammar in
//! [`crate::helium::lang`] is plain configuration fed through
//! [`GrammarBuilder`], and any other grammar can be built the same way.
//!
//! Matching is greedy and priority-ordered (PEG style): choices commit
//! to their first successful alternative and repetition never gives
//! input back. Parsing is a pure function of the grammar and the input;
//! offsets are threaded through return values, so one grammar can serve
//! concurrent parses without synchronization.

pub mod builder;
pub mod engine;
pub mod error;
pub mod node;
pub mod pattern;
pub mod rule;

pub use builder::GrammarBuilder;
pub use engine::Grammar;
pub use error::ParseError;
pub use node::{NodeValue, SyntaxNode};
pub use pattern::Pattern;
pub use rule::{ItemRef, Quantifier, Rule, RuleEntry, Shape};
