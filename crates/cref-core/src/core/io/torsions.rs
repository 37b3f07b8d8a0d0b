use crate::core::collaborators::{LookupError, TorsionLookup};
use crate::core::models::torsion::ChainTorsionProfile;
use crate::core::utils::identifiers::one_letter_code;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::trace;

#[derive(Debug, Deserialize)]
struct TorsionRecord {
    residue: String,
    phi: Option<f64>,
    psi: Option<f64>,
}

/// Torsion database stored as one `<structure id>.csv` file per structure.
///
/// Each file has a `residue,phi,psi` header; residues may be one- or three-letter codes
/// and an empty angle field marks an undefined angle. File names are lower case.
#[derive(Debug, Clone)]
pub struct TorsionDatabase {
    directory: PathBuf,
}

impl TorsionDatabase {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn profile_path(&self, structure_id: &str) -> PathBuf {
        self.directory
            .join(format!("{}.csv", structure_id.trim().to_ascii_lowercase()))
    }
}

impl TorsionLookup for TorsionDatabase {
    fn lookup(&self, structure_id: &str) -> Result<ChainTorsionProfile, LookupError> {
        let path = self.profile_path(structure_id);
        trace!("Reading torsions for {} from {:?}", structure_id, path);
        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LookupError::NotFound(structure_id.to_string()),
            _ => LookupError::Io {
                structure_id: structure_id.to_string(),
                source: e,
            },
        })?;
        read_profile(file).map_err(|e| LookupError::Malformed {
            structure_id: structure_id.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Parses a `residue,phi,psi` CSV stream into a torsion profile.
pub fn read_profile(reader: impl Read) -> Result<ChainTorsionProfile, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut profile = ChainTorsionProfile::default();
    for record in csv_reader.deserialize() {
        let record: TorsionRecord = record?;
        profile
            .residues
            .push(one_letter_code(&record.residue).unwrap_or('X'));
        profile.phi.push(record.phi);
        profile.psi.push(record.psi);
    }
    Ok(profile)
}
