use cref::engine::config::{
    DEFAULT_FRAGMENT_SIZE, DEFAULT_IDENTITY_THRESHOLD, DEFAULT_MAX_TEMPLATES,
    DEFAULT_NUMBER_OF_CLUSTERS,
};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub fragment_size: usize,
    pub number_of_clusters: usize,
    pub max_templates: usize,
    pub identity_threshold: f64,
    pub blast_executable: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            fragment_size: DEFAULT_FRAGMENT_SIZE,
            number_of_clusters: DEFAULT_NUMBER_OF_CLUSTERS,
            max_templates: DEFAULT_MAX_TEMPLATES,
            identity_threshold: DEFAULT_IDENTITY_THRESHOLD,
            blast_executable: PathBuf::from("blastp"),
        }
    }
}
