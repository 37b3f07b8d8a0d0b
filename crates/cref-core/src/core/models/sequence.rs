use crate::core::utils::identifiers::is_residue_code;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequenceError {
    #[error("Sequence is empty")]
    Empty,
    #[error("Invalid residue symbol '{symbol}' at position {position}")]
    InvalidResidue { position: usize, symbol: char },
}

/// The target amino-acid sequence of a prediction job, in upper-case one-letter codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    residues: String,
}

impl Sequence {
    /// Builds a sequence from one-letter codes, ignoring whitespace and case.
    pub fn new(residues: &str) -> Result<Self, SequenceError> {
        let mut normalized = String::with_capacity(residues.len());
        for symbol in residues.chars().filter(|c| !c.is_whitespace()) {
            if !is_residue_code(symbol) {
                return Err(SequenceError::InvalidResidue {
                    position: normalized.len(),
                    symbol,
                });
            }
            normalized.push(symbol.to_ascii_uppercase());
        }
        if normalized.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self {
            residues: normalized,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residue(&self, index: usize) -> Option<char> {
        self.residues.as_bytes().get(index).map(|&b| b as char)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residues)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.residues
    }
}
