//! The Helium data-definition grammar
//!
//! Helium is a small configuration format: a file holds one value or one
//! definition, optionally padded by whitespace and `#...#` comments.
//!
//!     # window settings #
//!     settings:obj=[width:int=800,title:str="main",tags:arr<str>=["a","b"]]
//!
//! Values are numbers, strings, characters, identifiers, arrays
//! `[v,v,...]`, and records `[name:type=value,...]`. Type annotations are
//! optional and may take generic arguments (`arr<str>`, `int<32>`).
//!
//! This module is configuration, not engine code: the whole language is
//! a rule table fed through [`GrammarBuilder`], and the engine knows
//! nothing about Helium. The table is built once, lazily, and shared by
//! every parse.
//!
//! Whitespace is significant inside values (strings keep their spaces),
//! so padding is only allowed around the top-level statement, as in the
//! original format.

use once_cell::sync::Lazy;

use super::grammar::{Grammar, GrammarBuilder, ParseError, SyntaxNode};

/// Name of the grammar's start rule.
pub const START_RULE: &str = "FILE";

/// The built-in Helium grammar, constructed once and shared.
pub static HELIUM: Lazy<Grammar> = Lazy::new(|| {
    helium_grammar().expect("built-in Helium grammar is valid")
});

/// Parse a Helium document with the built-in grammar.
pub fn parse(input: &str) -> Result<SyntaxNode, ParseError> {
    HELIUM.parse(input)
}

/// Build the Helium grammar as a fresh table.
///
/// The file is bracketed by the zero-width `^` / `$` anchors, so the
/// start rule itself insists on reaching the end of the input.
pub fn helium_grammar() -> Result<Grammar, ParseError> {
    GrammarBuilder::new(START_RULE)
        // Zero-width anchors bracketing the whole file
        .terminal("BOF", r"^")
        .terminal("EOF", r"$")
        // Structural characters, consumed but never retained
        .terminal("LB", r"\[")
        .terminal("RB", r"\]")
        .terminal("COMMA", ",")
        .terminal("COLON", ":")
        .terminal("EQUAL", "=")
        .terminal("LT", "<")
        .terminal("GT", ">")
        // Value-bearing terminals
        .terminal("IDENTIFIER", r"[A-Za-z_]\w*")
        .terminal("NUMBER", r"[-+]?\d+(\.\d+)?")
        .terminal("STRING", r#""(\\.|[^"\\])*""#)
        .terminal("CHARACTER", r"'(\\.|[^'\\])'")
        // Padding
        .terminal("COMMENT", "#[^#]*#")
        .terminal("WHITESPACE", r"\s+")
        .choice("PAD", &["COMMENT", "WHITESPACE"])
        // Types: a plain identifier or a generic application. GENERIC is
        // tried first; a committed IDENTIFIER would strand the `<`.
        .choice("TYPE", &["GENERIC", "IDENTIFIER"])
        .sequence("GENERIC", &["IDENTIFIER", "LT", "TYPEARGS", "GT"])
        .choice("TYPEARG", &["TYPE", "NUMBER"])
        .sequence("TYPEARGS_TAIL", &["COMMA", "TYPEARG"])
        .sequence("TYPEARGS", &["TYPEARG", "TYPEARGS_TAIL*"])
        // Definitions: name, optional `:type`, `=`, value
        .sequence("TYPEDECL", &["COLON", "TYPE"])
        .sequence("DEFINITION", &["IDENTIFIER", "TYPEDECL?", "EQUAL", "VALUE"])
        // Values; records before arrays so `[name:type=...]` is not
        // half-consumed as an array of identifiers
        .choice(
            "VALUE",
            &["RECORD", "ARRAY", "NUMBER", "STRING", "CHARACTER", "IDENTIFIER"],
        )
        .sequence("ARRAY_TAIL", &["COMMA", "VALUE"])
        .sequence("ARRAY", &["LB", "VALUE", "ARRAY_TAIL*", "RB"])
        .sequence("RECORD_TAIL", &["COMMA", "DEFINITION"])
        .sequence("RECORD", &["LB", "DEFINITION", "RECORD_TAIL*", "RB"])
        // Top level: one statement with optional padding
        .choice("STATEMENT", &["DEFINITION", "VALUE"])
        .sequence("FILE", &["BOF", "PAD*", "STATEMENT", "PAD*", "EOF"])
        // Shaping
        .suppress("BOF")
        .suppress("EOF")
        .suppress("LB")
        .suppress("RB")
        .suppress("COMMA")
        .suppress("COLON")
        .suppress("EQUAL")
        .suppress("LT")
        .suppress("GT")
        .suppress("COMMENT")
        .suppress("WHITESPACE")
        .suppress("PAD")
        .collapse("TYPEARGS_TAIL")
        .expose("TYPEARGS", "TYPEARG")
        .collapse("TYPEDECL")
        .collapse("ARRAY_TAIL")
        .collapse("RECORD_TAIL")
        .collapse("FILE")
        .build()
}
