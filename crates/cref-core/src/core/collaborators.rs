//! Interfaces to the external services the prediction depends on.
//!
//! Every collaborator is a small synchronous capability: given an input, return a value
//! or fail. File-backed implementations live in [`crate::core::io`]; tests substitute
//! in-memory fakes.

use super::models::candidate::ReferenceChain;
use super::models::hit::HomologyHit;
use super::models::search::SearchParameters;
use super::models::torsion::ChainTorsionProfile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search execution failed: {0}")]
    Execution(String),
    #[error("Malformed search output: {0}")]
    Parse(String),
    #[error("I/O error during search: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Secondary structure prediction unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error during secondary structure prediction: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Structure '{0}' not found in torsion database")]
    NotFound(String),
    #[error("Malformed torsion data for structure '{structure_id}': {reason}")]
    Malformed {
        structure_id: String,
        reason: String,
    },
    #[error("Structure '{0}' failed to resolve earlier in this job")]
    PreviouslyFailed(String),
    #[error("I/O error reading torsions for structure '{structure_id}': {source}")]
    Io {
        structure_id: String,
        source: std::io::Error,
    },
}

/// Finds reference chains homologous to a fragment.
pub trait HomologySearch {
    fn search(
        &self,
        fragment: &str,
        parameters: &SearchParameters,
    ) -> Result<Vec<HomologyHit>, SearchError>;
}

/// Predicts one structural-class label per residue of a sequence.
pub trait SecondaryStructurePredictor {
    fn predict(&self, sequence: &str) -> Result<String, PredictionError>;
}

/// Returns the experimental backbone torsions of a structure.
pub trait TorsionLookup {
    fn lookup(&self, structure_id: &str) -> Result<ChainTorsionProfile, LookupError>;
}

/// Returns the full sequence and DSSP assignment of a reference chain, if known.
pub trait ReferenceChains {
    fn reference_chain(&self, structure_id: &str, chain: &str) -> Option<ReferenceChain>;
}
