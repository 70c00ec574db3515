// src/error.rs
//
// Crate error type. Every variant states where things went wrong.

use std::fmt::{self, Display};

#[derive(Debug)]
pub enum EffectError {
    Config(String),   // Rejected configuration value; prior value is kept
    FontLoad(String), // Loading/parsing a font file failed
    WordList(String), // Invalid word list operation
    Export(String),   // Writing the canvas image failed
}

impl Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::Config(s) => write!(f, "Config error: {s}"),
            EffectError::FontLoad(s) => write!(f, "Font load error: {s}"),
            EffectError::WordList(s) => write!(f, "Word list error: {s}"),
            EffectError::Export(s) => write!(f, "Export error: {s}"),
        }
    }
}

impl std::error::Error for EffectError {}
