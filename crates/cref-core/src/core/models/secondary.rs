use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse, three-state structural class of a residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecondaryStructure {
    Helix,
    Strand,
    Coil,
}

// DSSP eight-state codes; anything not listed is coil.
static DSSP_CLASSES: Map<char, SecondaryStructure> = phf_map! {
    'H' => SecondaryStructure::Helix,
    'G' => SecondaryStructure::Helix,
    'I' => SecondaryStructure::Helix,
    'E' => SecondaryStructure::Strand,
    'B' => SecondaryStructure::Strand,
};

impl SecondaryStructure {
    /// Reduces a DSSP (or three-state) label to its structural class.
    pub fn from_code(code: char) -> Self {
        DSSP_CLASSES
            .get(&code.to_ascii_uppercase())
            .copied()
            .unwrap_or(SecondaryStructure::Coil)
    }

    /// Symbol used in fragment labelings, where coil is written `-`.
    pub fn code(self) -> char {
        match self {
            SecondaryStructure::Helix => 'H',
            SecondaryStructure::Strand => 'E',
            SecondaryStructure::Coil => '-',
        }
    }

    /// Symbol used in three-state (H/E/C) output files.
    pub fn three_state_code(self) -> char {
        match self {
            SecondaryStructure::Helix => 'H',
            SecondaryStructure::Strand => 'E',
            SecondaryStructure::Coil => 'C',
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SecondaryStructure::Helix => "helix",
            SecondaryStructure::Strand => "strand",
            SecondaryStructure::Coil => "coil",
        };
        f.write_str(name)
    }
}

/// Rewrites a labeling in H/E/C form.
pub fn to_three_state(labels: &str) -> String {
    labels
        .chars()
        .map(|c| SecondaryStructure::from_code(c).three_state_code())
        .collect()
}

/// Rewrites a predicted labeling for fragment use: three-state classes with coil as `-`.
pub fn to_fragment_labels(labels: &str) -> String {
    labels
        .chars()
        .map(|c| SecondaryStructure::from_code(c).code())
        .collect()
}
