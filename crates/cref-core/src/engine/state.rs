use super::cache::{IdentityCache, TorsionCache};

/// Memo tables owned by one prediction job.
///
/// A fresh state is created per job and passed by `&mut` into every fragment; independent
/// jobs never share one.
#[derive(Debug, Default, Clone)]
pub struct JobState {
    pub torsions: TorsionCache,
    pub identities: IdentityCache,
}

impl JobState {
    pub fn new() -> Self {
        Self::default()
    }
}
