// src/models/word_list.rs
//
// The cyclic word list the effect steps through. The index is always a
// valid index into the list; next/previous wrap in both directions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

#[derive(Debug, Serialize, Deserialize)]
struct WordListFile {
    words: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    index: usize,
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: ["kinetic", "typography", "motion", "fluid", "dynamic"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            index: 0,
        }
    }
}

impl WordList {
    pub fn new(words: Vec<String>) -> Result<Self, EffectError> {
        if words.is_empty() {
            return Err(EffectError::WordList(
                "word list must not be empty".to_string(),
            ));
        }
        Ok(Self { words, index: 0 })
    }

    /// Load a `{"words": [...]}` JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EffectError> {
        let content = fs::read_to_string(&path)
            .map_err(|e| EffectError::WordList(format!("reading word list file: {e}")))?;
        let file: WordListFile = serde_json::from_str(&content)
            .map_err(|e| EffectError::WordList(format!("parsing word list file: {e}")))?;
        Self::new(file.words)
    }

    /// Replace the list. Resets the index to 0. An empty replacement is
    /// rejected and the current list stays untouched.
    pub fn replace(&mut self, words: Vec<String>) -> Result<(), EffectError> {
        if words.is_empty() {
            return Err(EffectError::WordList(
                "word list must not be empty".to_string(),
            ));
        }
        self.words = words;
        self.index = 0;
        Ok(())
    }

    pub fn current(&self) -> &str {
        &self.words[self.index]
    }

    pub fn next(&mut self) -> &str {
        self.index = (self.index + 1) % self.words.len();
        &self.words[self.index]
    }

    pub fn previous(&mut self) -> &str {
        self.index = if self.index == 0 {
            self.words.len() - 1
        } else {
            self.index - 1
        };
        &self.words[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
