use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One local alignment of a query fragment against a reference chain.
///
/// Offsets follow the BLAST convention: 1-based and inclusive, in query and subject
/// coordinates respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomologyHit {
    pub structure_id: String,
    pub chain: String,
    /// Aligned subject substring.
    pub subject: String,
    pub query_start: usize,
    pub query_end: usize,
    pub subject_start: usize,
    pub subject_end: usize,
    /// Number of identical residues in the alignment.
    pub identities: usize,
    pub score: f64,
}

impl HomologyHit {
    /// Orders hits best-first: more identical residues, then higher score.
    pub fn rank_order(a: &HomologyHit, b: &HomologyHit) -> Ordering {
        b.identities
            .cmp(&a.identities)
            .then_with(|| b.score.total_cmp(&a.score))
    }
}

/// Sorts hits best-first; equal hits keep their search order.
pub fn rank_hits(hits: &mut [HomologyHit]) {
    hits.sort_by(HomologyHit::rank_order);
}
