use cref::engine::config::PredictionConfig;
use std::path::PathBuf;

/// Where fragment hits come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchSource {
    /// Precomputed BLAST tabular output keyed by fragment.
    Precomputed(PathBuf),
    /// A `blastp` run per fragment.
    Blast {
        executable: PathBuf,
        database: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub torsions_dir: PathBuf,
    pub references: PathBuf,
    pub labels: PathBuf,
    pub search: SearchSource,
}

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub data: DataPaths,
    pub core_config: PredictionConfig,
}
