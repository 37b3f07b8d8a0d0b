use serde::{Deserialize, Serialize};

/// A backbone (phi, psi) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionPair {
    pub phi: f64,
    pub psi: f64,
}

impl TorsionPair {
    /// Placeholder for residues whose angles could not be predicted.
    pub const UNRESOLVED: TorsionPair = TorsionPair {
        phi: 180.0,
        psi: 180.0,
    };

    pub const fn new(phi: f64, psi: f64) -> Self {
        Self { phi, psi }
    }

    pub fn is_unresolved(&self) -> bool {
        *self == Self::UNRESOLVED
    }
}

/// Experimentally determined backbone torsions of one reference structure.
///
/// `phi` and `psi` are index-aligned with `residues`; `None` marks an angle that is
/// undefined (chain termini, missing atoms).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainTorsionProfile {
    pub residues: String,
    pub phi: Vec<Option<f64>>,
    pub psi: Vec<Option<f64>>,
}

impl ChainTorsionProfile {
    pub fn new(residues: String, phi: Vec<Option<f64>>, psi: Vec<Option<f64>>) -> Self {
        Self { residues, phi, psi }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Whether residues and both angle series have the same length.
    pub fn is_consistent(&self) -> bool {
        self.residues.is_ascii()
            && self.phi.len() == self.residues.len()
            && self.psi.len() == self.residues.len()
    }

    /// Offset of the first exact occurrence of `subject` in the residue sequence.
    pub fn locate(&self, subject: &str) -> Option<usize> {
        if subject.is_empty() {
            return None;
        }
        self.residues.find(subject)
    }

    /// Residue symbol and angles at `position`, if the position exists.
    pub fn angles_at(&self, position: usize) -> Option<(char, Option<f64>, Option<f64>)> {
        let residue = *self.residues.as_bytes().get(position)? as char;
        let phi = *self.phi.get(position)?;
        let psi = *self.psi.get(position)?;
        Some((residue, phi, psi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ChainTorsionProfile {
        ChainTorsionProfile::new(
            "MKVLA".to_string(),
            vec![None, Some(-60.0), Some(-65.0), Some(-120.0), Some(-70.0)],
            vec![Some(140.0), Some(-45.0), Some(-40.0), Some(130.0), None],
        )
    }

    #[test]
    fn locate_finds_first_exact_occurrence() {
        let p = ChainTorsionProfile::new("AKAKA".to_string(), vec![None; 5], vec![None; 5]);
        assert_eq!(p.locate("KA"), Some(1));
        assert_eq!(p.locate("KK"), None);
        assert_eq!(p.locate(""), None);
    }

    #[test]
    fn angles_at_returns_residue_and_optional_angles() {
        let p = profile();
        assert_eq!(p.angles_at(1), Some(('K', Some(-60.0), Some(-45.0))));
        assert_eq!(p.angles_at(0), Some(('M', None, Some(140.0))));
        assert_eq!(p.angles_at(5), None);
    }

    #[test]
    fn is_consistent_detects_mismatched_angle_series() {
        assert!(profile().is_consistent());
        let mut broken = profile();
        broken.psi.pop();
        assert!(!broken.is_consistent());
    }

    #[test]
    fn unresolved_pair_is_180_180() {
        assert_eq!(TorsionPair::UNRESOLVED, TorsionPair::new(180.0, 180.0));
        assert!(TorsionPair::new(180.0, 180.0).is_unresolved());
        assert!(!TorsionPair::new(-60.0, -45.0).is_unresolved());
    }
}
