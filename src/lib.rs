//! # helium
//!
//! A declarative grammar engine and a parser for the Helium
//! data-definition format built on top of it.
//!
//! The engine ([grammar](helium::grammar)) interprets a table of named
//! production rules - pattern terminals, quantified sequences, ordered
//! choices - with a recursive-descent evaluator, producing a labeled
//! syntax tree. The Helium language itself ([lang](helium::lang)) is
//! just configuration for that engine.

pub mod helium;
