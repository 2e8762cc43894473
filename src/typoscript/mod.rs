//! Main module for TypoScript lexing functionality

pub mod lexing;
pub mod registry;
pub mod testing;
pub mod token;
