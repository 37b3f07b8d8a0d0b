use super::error::DataLoadError;
use crate::core::collaborators::{HomologySearch, SearchError};
use crate::core::models::hit::HomologyHit;
use crate::core::models::search::SearchParameters;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// BLAST tabular format understood by [`read_tabular`].
pub const TABULAR_FORMAT: &str = "6 qseqid sseqid qstart qend sstart send nident score sseq";

type TabularRecord = (String, String, usize, usize, usize, usize, usize, f64, String);

/// Splits a PDB seqres subject id into a lower-case structure id and a chain id.
///
/// Accepts `1abc_A`, `1ABC:A` and `pdb|1ABC|A`.
pub fn parse_subject_id(subject_id: &str) -> Option<(String, String)> {
    let subject_id = subject_id.trim();
    let (structure, chain) = if let Some(rest) = subject_id.strip_prefix("pdb|") {
        rest.split_once('|')?
    } else {
        subject_id
            .split_once('_')
            .or_else(|| subject_id.split_once(':'))?
    };
    if structure.is_empty() || chain.is_empty() {
        return None;
    }
    Some((structure.to_ascii_lowercase(), chain.to_string()))
}

/// Parses BLAST tabular output in [`TABULAR_FORMAT`] into `(query id, hit)` pairs.
pub fn read_tabular(reader: impl Read) -> Result<Vec<(String, HomologyHit)>, SearchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut hits = Vec::new();
    for record in csv_reader.deserialize() {
        let (query, subject_id, qstart, qend, sstart, send, nident, score, sseq): TabularRecord =
            record.map_err(|e| SearchError::Parse(e.to_string()))?;
        let (structure_id, chain) = parse_subject_id(&subject_id).ok_or_else(|| {
            SearchError::Parse(format!("unrecognized subject id '{}'", subject_id))
        })?;
        hits.push((
            query,
            HomologyHit {
                structure_id,
                chain,
                subject: sseq,
                query_start: qstart,
                query_end: qend,
                subject_start: sstart,
                subject_end: send,
                identities: nident,
                score,
            },
        ));
    }
    Ok(hits)
}

/// Precomputed search results keyed by query fragment.
///
/// The query id column of the tabular file must hold the fragment sequence itself.
#[derive(Debug, Clone, Default)]
pub struct HitTable {
    hits: HashMap<String, Vec<HomologyHit>>,
}

impl HitTable {
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path).map_err(|e| DataLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_reader(file).map_err(|e| DataLoadError::Invalid {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, SearchError> {
        let mut hits: HashMap<String, Vec<HomologyHit>> = HashMap::new();
        for (query, hit) in read_tabular(reader)? {
            hits.entry(query.to_ascii_uppercase()).or_default().push(hit);
        }
        Ok(Self { hits })
    }

    pub fn fragment_count(&self) -> usize {
        self.hits.len()
    }
}

impl HomologySearch for HitTable {
    fn search(
        &self,
        fragment: &str,
        parameters: &SearchParameters,
    ) -> Result<Vec<HomologyHit>, SearchError> {
        Ok(self
            .hits
            .get(&fragment.to_ascii_uppercase())
            .map(|hits| {
                hits.iter()
                    .take(parameters.number_of_alignments)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
