use crate::core::collaborators::{
    HomologySearch, LookupError, PredictionError, SearchError, SecondaryStructurePredictor,
    TorsionLookup,
};
use crate::core::models::hit::HomologyHit;
use crate::core::models::search::SearchParameters;
use crate::core::models::torsion::ChainTorsionProfile;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct FakeTorsions {
    profiles: HashMap<String, ChainTorsionProfile>,
    calls: RefCell<HashMap<String, usize>>,
}

impl FakeTorsions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, structure_id: &str, profile: ChainTorsionProfile) -> Self {
        self.profiles
            .insert(structure_id.to_ascii_lowercase(), profile);
        self
    }

    pub fn calls(&self, structure_id: &str) -> usize {
        self.calls
            .borrow()
            .get(&structure_id.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }
}

impl TorsionLookup for FakeTorsions {
    fn lookup(&self, structure_id: &str) -> Result<ChainTorsionProfile, LookupError> {
        let key = structure_id.to_ascii_lowercase();
        *self.calls.borrow_mut().entry(key.clone()).or_default() += 1;
        self.profiles
            .get(&key)
            .cloned()
            .ok_or(LookupError::NotFound(key))
    }
}

#[derive(Default)]
pub struct FakeSearch {
    hits: HashMap<String, Vec<HomologyHit>>,
    failing: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, fragment: &str, hits: Vec<HomologyHit>) -> Self {
        self.hits.insert(fragment.to_string(), hits);
        self
    }

    pub fn failing_for(mut self, fragment: &str) -> Self {
        self.failing.insert(fragment.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl HomologySearch for FakeSearch {
    fn search(
        &self,
        fragment: &str,
        _parameters: &SearchParameters,
    ) -> Result<Vec<HomologyHit>, SearchError> {
        self.calls.borrow_mut().push(fragment.to_string());
        if self.failing.contains(fragment) {
            return Err(SearchError::Execution("search service unavailable".to_string()));
        }
        Ok(self.hits.get(fragment).cloned().unwrap_or_default())
    }
}

pub struct FakePredictor {
    labels: Option<String>,
}

impl FakePredictor {
    pub fn returning(labels: &str) -> Self {
        Self {
            labels: Some(labels.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { labels: None }
    }
}

impl SecondaryStructurePredictor for FakePredictor {
    fn predict(&self, _sequence: &str) -> Result<String, PredictionError> {
        self.labels
            .clone()
            .ok_or_else(|| PredictionError::Unavailable("predictor offline".to_string()))
    }
}

/// Hit aligning the whole query fragment onto `subject`, which starts at 1-based
/// `subject_start` in the reference chain.
pub fn full_hit(
    structure_id: &str,
    chain: &str,
    subject: &str,
    subject_start: usize,
    identities: usize,
    score: f64,
) -> HomologyHit {
    HomologyHit {
        structure_id: structure_id.to_string(),
        chain: chain.to_string(),
        subject: subject.to_string(),
        query_start: 1,
        query_end: subject.len(),
        subject_start,
        subject_end: subject_start + subject.len() - 1,
        identities,
        score,
    }
}

/// Profile with every angle resolved: phi = `phi`, psi = `psi` for each residue.
pub fn uniform_profile(residues: &str, phi: f64, psi: f64) -> ChainTorsionProfile {
    ChainTorsionProfile::new(
        residues.to_string(),
        vec![Some(phi); residues.len()],
        vec![Some(psi); residues.len()],
    )
}
