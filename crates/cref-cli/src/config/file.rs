use crate::error::{CliError, Result};
use cref::core::models::search::GapCosts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilePredictionConfig {
    pub fragment_size: Option<usize>,
    pub number_of_clusters: Option<usize>,
    pub max_templates: Option<usize>,
    pub excluded_structures: Option<Vec<String>>,
    pub identity_threshold: Option<f64>,
    pub reference_structure: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub expect_threshold: Option<f64>,
    pub number_of_alignments: Option<usize>,
    pub word_size: Option<usize>,
    pub matrix: Option<String>,
    pub gap_costs: Option<GapCosts>,
}

/// Data sources. Relative paths are taken relative to the config file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDataConfig {
    pub torsions: Option<PathBuf>,
    pub references: Option<PathBuf>,
    pub labels: Option<PathBuf>,
    pub hits: Option<PathBuf>,
    pub blast_db: Option<PathBuf>,
    pub blast_executable: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub prediction: Option<FilePredictionConfig>,
    pub search: Option<FileSearchConfig>,
    pub data: Option<FileDataConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let (Some(data), Some(base)) = (config.data.as_mut(), path.parent()) {
            data.rebase(base);
        }
        Ok(config)
    }
}

impl FileDataConfig {
    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.torsions,
            &mut self.references,
            &mut self.labels,
            &mut self.hits,
            &mut self.blast_db,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        // A bare executable name is looked up on PATH.
        if let Some(executable) = self.blast_executable.as_mut() {
            if executable.is_relative() && executable.components().count() > 1 {
                *executable = base.join(&*executable);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cref.toml");
        fs::write(
            &path,
            r#"
            [prediction]
            fragment-size = 7
            number-of-clusters = 4
            max-templates = 50
            excluded-structures = ["1ABC", "2xyz"]
            identity-threshold = 90.0
            reference-structure = "1crn"

            [search]
            expect-threshold = 1000.0
            number-of-alignments = 250
            word-size = 3
            matrix = "BLOSUM62"
            gap-costs = "11 1"

            [data]
            torsions = "torsions"
            references = "/srv/cref/references.csv"
            blast-executable = "blastp"
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let prediction = config.prediction.unwrap();
        assert_eq!(prediction.fragment_size, Some(7));
        assert_eq!(prediction.excluded_structures.unwrap().len(), 2);
        assert_eq!(prediction.reference_structure.as_deref(), Some("1crn"));

        let search = config.search.unwrap();
        assert_eq!(search.gap_costs, Some(GapCosts::Affine { open: 11, extend: 1 }));
        assert_eq!(search.matrix.as_deref(), Some("BLOSUM62"));

        let data = config.data.unwrap();
        assert_eq!(data.torsions, Some(dir.path().join("torsions")));
        assert_eq!(
            data.references,
            Some(PathBuf::from("/srv/cref/references.csv"))
        );
        assert_eq!(data.blast_executable, Some(PathBuf::from("blastp")));
        assert!(data.hits.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cref.toml");
        fs::write(&path, "[prediction]\nfragment-length = 5\n").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn malformed_gap_costs_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cref.toml");
        fs::write(&path, "[search]\ngap-costs = \"eleven\"\n").unwrap();

        assert!(FileConfig::from_file(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
