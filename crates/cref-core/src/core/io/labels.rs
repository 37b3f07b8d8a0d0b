use super::error::DataLoadError;
use crate::core::collaborators::{PredictionError, SecondaryStructurePredictor};
use std::path::Path;

/// A secondary-structure prediction computed ahead of time and stored in a file.
///
/// The file holds the labels as plain text or as a single FASTA-style record; header
/// lines (`>`) and whitespace are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFile {
    labels: String,
}

impl LabelFile {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Ok(Self::from_text(&content))
    }

    pub fn from_text(content: &str) -> Self {
        let labels = content
            .lines()
            .filter(|line| !line.trim_start().starts_with('>'))
            .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
            .collect();
        Self { labels }
    }

    pub fn labels(&self) -> &str {
        &self.labels
    }
}

impl SecondaryStructurePredictor for LabelFile {
    fn predict(&self, _sequence: &str) -> Result<String, PredictionError> {
        if self.labels.is_empty() {
            return Err(PredictionError::Unavailable(
                "label file contains no labels".to_string(),
            ));
        }
        Ok(self.labels.clone())
    }
}
