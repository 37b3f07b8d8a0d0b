use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_EXPECT_THRESHOLD: f64 = 900_000.0;
pub const DEFAULT_NUMBER_OF_ALIGNMENTS: usize = 500;
pub const DEFAULT_WORD_SIZE: usize = 2;
pub const DEFAULT_SCORING_MATRIX: &str = "PAM30";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid gap costs '{0}'. Expected 'ungapped' or '<open> <extend>' (e.g., '11 1').")]
pub struct GapCostsError(pub String);

/// Gap policy of the homology search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GapCosts {
    #[default]
    Ungapped,
    Affine {
        open: u32,
        extend: u32,
    },
}

impl FromStr for GapCosts {
    type Err = GapCostsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ungapped") {
            return Ok(GapCosts::Ungapped);
        }
        let parts: Vec<_> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            [open, extend] => {
                let open = open.parse().map_err(|_| GapCostsError(s.to_string()))?;
                let extend = extend.parse().map_err(|_| GapCostsError(s.to_string()))?;
                Ok(GapCosts::Affine { open, extend })
            }
            _ => Err(GapCostsError(s.to_string())),
        }
    }
}

impl fmt::Display for GapCosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapCosts::Ungapped => f.write_str("ungapped"),
            GapCosts::Affine { open, extend } => write!(f, "{} {}", open, extend),
        }
    }
}

impl TryFrom<String> for GapCosts {
    type Error = GapCostsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GapCosts> for String {
    fn from(value: GapCosts) -> Self {
        value.to_string()
    }
}

/// Parameters handed to the homology search for every fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchParameters {
    pub expect_threshold: f64,
    pub number_of_alignments: usize,
    pub word_size: usize,
    pub matrix: String,
    pub gap_costs: GapCosts,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            expect_threshold: DEFAULT_EXPECT_THRESHOLD,
            number_of_alignments: DEFAULT_NUMBER_OF_ALIGNMENTS,
            word_size: DEFAULT_WORD_SIZE,
            matrix: DEFAULT_SCORING_MATRIX.to_string(),
            gap_costs: GapCosts::Ungapped,
        }
    }
}
