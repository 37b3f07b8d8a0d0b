use crate::core::models::fragment::FragmentError;
use crate::core::models::search::{GapCostsError, SearchParameters};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_FRAGMENT_SIZE: usize = 5;
pub const DEFAULT_NUMBER_OF_CLUSTERS: usize = 8;
pub const DEFAULT_MAX_TEMPLATES: usize = 100;
pub const DEFAULT_IDENTITY_THRESHOLD: f64 = 0.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
    #[error(transparent)]
    GapCosts(#[from] GapCostsError),
    #[error(transparent)]
    Fragment(#[from] FragmentError),
    #[error("Secondary structure prediction returned {found} labels for {expected} residues")]
    LabelLength { expected: usize, found: usize },
}

/// Settings of one prediction job, validated by [`PredictionConfigBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PredictionConfig {
    pub fragment_size: usize,
    pub number_of_clusters: usize,
    pub max_templates: usize,
    /// Lower-cased structure ids that are never used as templates.
    pub excluded_structures: Vec<String>,
    /// Maximum global identity (percent) a template may share with the target; 0 disables
    /// the filter.
    pub identity_threshold: f64,
    pub search: SearchParameters,
    /// Structure whose experimental torsions the prediction is compared against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_structure: Option<String>,
}

impl PredictionConfig {
    /// Index of the central residue inside a fragment.
    pub fn central(&self) -> usize {
        self.fragment_size / 2
    }

    pub fn is_excluded(&self, structure_id: &str) -> bool {
        self.excluded_structures
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(structure_id))
    }

    pub fn identity_filter_enabled(&self) -> bool {
        self.identity_threshold > 0.0
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            number_of_clusters: DEFAULT_NUMBER_OF_CLUSTERS,
            max_templates: DEFAULT_MAX_TEMPLATES,
            excluded_structures: Vec::new(),
            identity_threshold: DEFAULT_IDENTITY_THRESHOLD,
            search: SearchParameters::default(),
            reference_structure: None,
        }
    }
}

#[derive(Default)]
pub struct PredictionConfigBuilder {
    fragment_size: Option<usize>,
    number_of_clusters: Option<usize>,
    max_templates: Option<usize>,
    excluded_structures: Vec<String>,
    identity_threshold: Option<f64>,
    search: Option<SearchParameters>,
    reference_structure: Option<String>,
}

impl PredictionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragment_size(mut self, size: usize) -> Self {
        self.fragment_size = Some(size);
        self
    }
    pub fn number_of_clusters(mut self, clusters: usize) -> Self {
        self.number_of_clusters = Some(clusters);
        self
    }
    pub fn max_templates(mut self, templates: usize) -> Self {
        self.max_templates = Some(templates);
        self
    }
    pub fn exclude_structure(mut self, structure_id: impl Into<String>) -> Self {
        self.excluded_structures.push(structure_id.into());
        self
    }
    pub fn excluded_structures<I, S>(mut self, structure_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_structures
            .extend(structure_ids.into_iter().map(Into::into));
        self
    }
    pub fn identity_threshold(mut self, percent: f64) -> Self {
        self.identity_threshold = Some(percent);
        self
    }
    pub fn search(mut self, parameters: SearchParameters) -> Self {
        self.search = Some(parameters);
        self
    }
    pub fn reference_structure(mut self, structure_id: impl Into<String>) -> Self {
        self.reference_structure = Some(structure_id.into());
        self
    }

    pub fn build(self) -> Result<PredictionConfig, ConfigError> {
        let fragment_size = self.fragment_size.unwrap_or(DEFAULT_FRAGMENT_SIZE);
        if fragment_size == 0 {
            return Err(FragmentError::ZeroSize.into());
        }

        let number_of_clusters = self.number_of_clusters.unwrap_or(DEFAULT_NUMBER_OF_CLUSTERS);
        if number_of_clusters == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "number_of_clusters",
                reason: "at least one cluster is required".to_string(),
            });
        }

        let max_templates = self.max_templates.unwrap_or(DEFAULT_MAX_TEMPLATES);
        if max_templates == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_templates",
                reason: "at least one template per fragment is required".to_string(),
            });
        }

        let identity_threshold = self
            .identity_threshold
            .unwrap_or(DEFAULT_IDENTITY_THRESHOLD);
        if !(0.0..=100.0).contains(&identity_threshold) {
            return Err(ConfigError::InvalidParameter {
                parameter: "identity_threshold",
                reason: format!("{} is not a percentage", identity_threshold),
            });
        }

        let search = self.search.unwrap_or_default();
        if search.expect_threshold.is_nan() || search.expect_threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "expect_threshold",
                reason: "must be positive".to_string(),
            });
        }
        if search.number_of_alignments == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "number_of_alignments",
                reason: "must be positive".to_string(),
            });
        }
        if search.word_size == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "word_size",
                reason: "must be positive".to_string(),
            });
        }
        if search.matrix.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "matrix",
                reason: "a scoring matrix name is required".to_string(),
            });
        }

        let mut excluded_structures: Vec<String> = self
            .excluded_structures
            .iter()
            .map(|id| id.trim().to_ascii_lowercase())
            .filter(|id| !id.is_empty())
            .collect();
        excluded_structures.sort();
        excluded_structures.dedup();

        let reference_structure = self
            .reference_structure
            .map(|id| id.trim().to_ascii_lowercase())
            .filter(|id| !id.is_empty());

        Ok(PredictionConfig {
            fragment_size,
            number_of_clusters,
            max_templates,
            excluded_structures,
            identity_threshold,
            search,
            reference_structure,
        })
    }
}
