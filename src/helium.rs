//! Main module for helium library functionality

pub mod grammar;
pub mod lang;
