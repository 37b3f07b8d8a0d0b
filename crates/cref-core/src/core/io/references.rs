use super::error::DataLoadError;
use crate::core::collaborators::ReferenceChains;
use crate::core::models::candidate::ReferenceChain;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ReferenceRecord {
    structure: String,
    chain: String,
    sequence: String,
    secondary_structure: String,
}

/// DSSP assignments of reference chains, loaded from a
/// `structure,chain,sequence,secondary_structure` CSV table.
///
/// Structure ids are matched case-insensitively; chain ids are case-sensitive. Labels are
/// kept verbatim, so blank DSSP codes survive.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    chains: HashMap<(String, String), ReferenceChain>,
}

impl ReferenceTable {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path).map_err(|e| DataLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.to_string_lossy())
    }

    pub fn from_reader(reader: impl Read, origin: &str) -> Result<Self, DataLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut chains = HashMap::new();
        for (line, record) in csv_reader.deserialize().enumerate() {
            let record: ReferenceRecord = record.map_err(|e| DataLoadError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let sequence = record.sequence.trim().to_ascii_uppercase();
            if sequence.len() != record.secondary_structure.len() {
                return Err(DataLoadError::Invalid {
                    path: origin.to_string(),
                    reason: format!(
                        "record {} ({}:{}) has {} residues but {} labels",
                        line + 1,
                        record.structure,
                        record.chain,
                        sequence.len(),
                        record.secondary_structure.len()
                    ),
                });
            }
            chains.insert(
                (
                    record.structure.trim().to_ascii_lowercase(),
                    record.chain.trim().to_string(),
                ),
                ReferenceChain {
                    sequence,
                    labels: record.secondary_structure,
                },
            );
        }
        Ok(Self { chains })
    }

    pub fn insert(&mut self, structure_id: &str, chain: &str, reference: ReferenceChain) {
        self.chains.insert(
            (structure_id.to_ascii_lowercase(), chain.to_string()),
            reference,
        );
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl ReferenceChains for ReferenceTable {
    fn reference_chain(&self, structure_id: &str, chain: &str) -> Option<ReferenceChain> {
        self.chains
            .get(&(structure_id.to_ascii_lowercase(), chain.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
structure,chain,sequence,secondary_structure
1ABC,A,MKVLA,-HHH-
1abc,B,GGS,E-E
";

    #[test]
    fn from_reader_indexes_chains_by_lowercase_structure_id() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 2);
        let chain = table.reference_chain("1abc", "A").unwrap();
        assert_eq!(chain.sequence, "MKVLA");
        assert_eq!(chain.labels, "-HHH-");
        assert!(table.reference_chain("1ABC", "B").is_some());
    }

    #[test]
    fn chain_ids_are_case_sensitive() {
        let table = ReferenceTable::from_reader(TABLE.as_bytes(), "test").unwrap();
        assert!(table.reference_chain("1abc", "a").is_none());
    }

    #[test]
    fn from_reader_rejects_label_length_mismatch() {
        let bad = "structure,chain,sequence,secondary_structure\n1xyz,A,MKV,HH\n";
        let result = ReferenceTable::from_reader(bad.as_bytes(), "bad.csv");
        assert!(matches!(result, Err(DataLoadError::Invalid { .. })));
    }

    #[test]
    fn load_reports_missing_file_as_io_error() {
        let result = ReferenceTable::load(Path::new("/nonexistent/references.csv"));
        assert!(matches!(result, Err(DataLoadError::Io { .. })));
    }
}
