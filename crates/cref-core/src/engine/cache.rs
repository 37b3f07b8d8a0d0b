use crate::core::collaborators::{LookupError, TorsionLookup};
use crate::core::models::torsion::ChainTorsionProfile;
use crate::core::utils::alignment::align_global;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Torsion profiles fetched during one job, plus the structures whose lookup failed.
///
/// Keys are lower-cased structure ids. A structure is looked up at most once: a success is
/// kept for the rest of the job and a failure is never retried.
#[derive(Debug, Default, Clone)]
pub struct TorsionCache {
    profiles: HashMap<String, ChainTorsionProfile>,
    failed: HashSet<String>,
}

impl TorsionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_angles(
        &mut self,
        structure_id: &str,
        lookup: &dyn TorsionLookup,
    ) -> Result<&ChainTorsionProfile, LookupError> {
        let key = structure_id.to_ascii_lowercase();
        if self.failed.contains(&key) {
            return Err(LookupError::PreviouslyFailed(key));
        }

        match self.profiles.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let result = lookup.lookup(entry.key()).and_then(|profile| {
                    if profile.is_consistent() {
                        Ok(profile)
                    } else {
                        Err(LookupError::Malformed {
                            structure_id: entry.key().clone(),
                            reason: format!(
                                "{} residues but {} phi and {} psi values",
                                profile.residues.len(),
                                profile.phi.len(),
                                profile.psi.len()
                            ),
                        })
                    }
                });
                match result {
                    Ok(profile) => Ok(entry.insert(profile)),
                    Err(e) => {
                        self.failed.insert(entry.into_key());
                        Err(e)
                    }
                }
            }
        }
    }

    /// Bans a structure for the rest of the job, e.g. after one of its hits pointed past
    /// the end of its chain.
    pub fn mark_failed(&mut self, structure_id: &str) {
        self.failed.insert(structure_id.to_ascii_lowercase());
    }

    pub fn is_failed(&self, structure_id: &str) -> bool {
        self.failed.contains(&structure_id.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Global identities between the target and reference chains, memoized per chain.
#[derive(Debug, Default, Clone)]
pub struct IdentityCache {
    identities: HashMap<(String, String), f64>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent identity of `target` against the chain's full sequence.
    ///
    /// Only the first call for a `(structure_id, chain)` pair aligns; later calls return
    /// the stored value.
    pub fn estimate(
        &mut self,
        structure_id: &str,
        chain: &str,
        target: &str,
        chain_sequence: &str,
    ) -> f64 {
        *self
            .identities
            .entry((structure_id.to_ascii_lowercase(), chain.to_string()))
            .or_insert_with(|| align_global(target, chain_sequence).identity())
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::FakeTorsions;

    fn profile() -> ChainTorsionProfile {
        ChainTorsionProfile::new(
            "MKV".to_string(),
            vec![None, Some(-60.0), Some(-70.0)],
            vec![Some(120.0), Some(-40.0), None],
        )
    }

    #[test]
    fn get_angles_invokes_lookup_once_per_structure() {
        let lookup = FakeTorsions::new().with_profile("1abc", profile());
        let mut cache = TorsionCache::new();

        assert_eq!(cache.get_angles("1abc", &lookup).unwrap().residues, "MKV");
        assert_eq!(cache.get_angles("1ABC", &lookup).unwrap().residues, "MKV");
        assert_eq!(lookup.calls("1abc"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_lookup_is_never_retried() {
        let lookup = FakeTorsions::new();
        let mut cache = TorsionCache::new();

        assert!(matches!(
            cache.get_angles("9zzz", &lookup),
            Err(LookupError::NotFound(_))
        ));
        assert!(matches!(
            cache.get_angles("9zzz", &lookup),
            Err(LookupError::PreviouslyFailed(_))
        ));
        assert_eq!(lookup.calls("9zzz"), 1);
        assert!(cache.is_failed("9ZZZ"));
        assert_eq!(cache.failed_count(), 1);
    }

    #[test]
    fn inconsistent_profile_is_rejected_and_marked_failed() {
        let broken = ChainTorsionProfile::new("MKV".to_string(), vec![None], vec![None]);
        let lookup = FakeTorsions::new().with_profile("2bad", broken);
        let mut cache = TorsionCache::new();

        assert!(matches!(
            cache.get_angles("2bad", &lookup),
            Err(LookupError::Malformed { .. })
        ));
        assert!(cache.is_failed("2bad"));
        assert!(cache.is_empty());
    }

    #[test]
    fn marked_structure_is_skipped_without_lookup() {
        let lookup = FakeTorsions::new().with_profile("1abc", profile());
        let mut cache = TorsionCache::new();

        cache.mark_failed("1ABC");

        assert!(cache.is_failed("1abc"));
        assert!(matches!(
            cache.get_angles("1abc", &lookup),
            Err(LookupError::PreviouslyFailed(_))
        ));
        assert_eq!(lookup.calls("1abc"), 0);
    }

    #[test]
    fn identity_is_memoized_per_structure_and_chain() {
        let mut cache = IdentityCache::new();

        assert_eq!(cache.estimate("1abc", "A", "MKVLA", "MKVLA"), 100.0);
        assert_eq!(cache.estimate("1ABC", "A", "MKVLA", "WWWWW"), 100.0);
        assert_eq!(cache.estimate("1abc", "B", "MKVLA", "WWWWW"), 0.0);
        assert_eq!(cache.len(), 2);
    }
}
