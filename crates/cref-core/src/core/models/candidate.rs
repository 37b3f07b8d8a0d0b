use super::secondary::SecondaryStructure;
use super::torsion::TorsionPair;

/// Full sequence and DSSP assignment of one reference chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceChain {
    pub sequence: String,
    pub labels: String,
}

/// A template accepted for one fragment: the aligned region of a reference chain and the
/// torsions observed at the position aligned to the fragment's central residue.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStructure {
    pub structure_id: String,
    pub chain: String,
    /// Query fragment and its predicted labels.
    pub fragment: String,
    pub fragment_labels: String,
    /// Aligned subject substring as reported by the search.
    pub subject: String,
    /// Reference region covering the whole fragment, flanks included.
    pub subject_full: String,
    pub subject_labels: String,
    pub central_class: SecondaryStructure,
    pub central_residue: char,
    /// Percent of fragment residues identical in the alignment.
    pub identity: u32,
    /// Global identity against the target sequence, when identity filtering is enabled.
    pub global_identity: Option<f64>,
    pub score: f64,
    pub angles: TorsionPair,
}
