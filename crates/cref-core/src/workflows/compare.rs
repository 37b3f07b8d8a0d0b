use crate::core::models::torsion::{ChainTorsionProfile, TorsionPair};

/// Predicted and experimental angles of one residue and their angular distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueDeviation {
    pub index: usize,
    pub residue: char,
    pub label: char,
    pub experimental: TorsionPair,
    pub predicted: TorsionPair,
    pub phi_difference: f64,
    pub psi_difference: f64,
}

/// Distance between two angles in degrees, in `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    180.0 - (180.0 - (a - b).abs()).abs()
}

/// Compares a prediction with the experimental torsions of the same protein.
///
/// The experimental phi of the first residue and psi of the last residue are undefined and
/// are taken as 180°. The comparison stops at the first residue without experimental
/// angles.
pub fn compare_with_experiment(
    sequence: &str,
    labels: &str,
    predicted: &[TorsionPair],
    experimental: &ChainTorsionProfile,
) -> Vec<ResidueDeviation> {
    let last = experimental.len().saturating_sub(1);
    let mut deviations = Vec::with_capacity(predicted.len());

    for (index, ((residue, label), predicted)) in sequence
        .chars()
        .zip(labels.chars())
        .zip(predicted)
        .enumerate()
    {
        if index >= experimental.len() {
            break;
        }
        let phi = if index == 0 {
            Some(180.0)
        } else {
            experimental.phi.get(index).copied().flatten()
        };
        let psi = if index == last {
            Some(180.0)
        } else {
            experimental.psi.get(index).copied().flatten()
        };
        let (Some(phi), Some(psi)) = (phi, psi) else {
            break;
        };

        deviations.push(ResidueDeviation {
            index,
            residue,
            label,
            experimental: TorsionPair::new(phi, psi),
            predicted: *predicted,
            phi_difference: angular_difference(phi, predicted.phi),
            psi_difference: angular_difference(psi, predicted.psi),
        });
    }
    deviations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angular_difference_wraps_around_the_circle() {
        assert_eq!(angular_difference(-170.0, 170.0), 20.0);
        assert_eq!(angular_difference(170.0, -170.0), 20.0);
        assert_eq!(angular_difference(-60.0, -40.0), 20.0);
        assert_eq!(angular_difference(0.0, 180.0), 180.0);
        assert_eq!(angular_difference(45.0, 45.0), 0.0);
    }

    #[test]
    fn termini_use_placeholder_experimental_angles() {
        let experimental = ChainTorsionProfile::new(
            "MKV".to_string(),
            vec![None, Some(-60.0), Some(-70.0)],
            vec![Some(150.0), Some(-45.0), None],
        );
        let predicted = [
            TorsionPair::UNRESOLVED,
            TorsionPair::new(-65.0, -40.0),
            TorsionPair::UNRESOLVED,
        ];

        let deviations = compare_with_experiment("MKV", "CHC", &predicted, &experimental);

        assert_eq!(deviations.len(), 3);
        assert_eq!(deviations[0].experimental, TorsionPair::new(180.0, 150.0));
        assert_eq!(deviations[0].phi_difference, 0.0);
        assert_eq!(deviations[0].psi_difference, 30.0);
        assert_eq!(deviations[1].phi_difference, 5.0);
        assert_eq!(deviations[1].psi_difference, 5.0);
        assert_eq!(deviations[2].experimental, TorsionPair::new(-70.0, 180.0));
        assert_eq!(deviations[2].label, 'C');
    }

    #[test]
    fn comparison_stops_at_first_missing_experimental_angle() {
        let experimental = ChainTorsionProfile::new(
            "MKVL".to_string(),
            vec![None, Some(-60.0), None, Some(-70.0)],
            vec![Some(150.0), Some(-45.0), Some(-40.0), None],
        );
        let predicted = [TorsionPair::UNRESOLVED; 4];

        let deviations = compare_with_experiment("MKVL", "CHHC", &predicted, &experimental);

        assert_eq!(deviations.len(), 2);
    }

    #[test]
    fn comparison_stops_where_experimental_chain_ends() {
        let experimental = ChainTorsionProfile::new(
            "MK".to_string(),
            vec![None, Some(-60.0)],
            vec![Some(150.0), None],
        );
        let predicted = [TorsionPair::UNRESOLVED; 4];

        let deviations = compare_with_experiment("MKVL", "CHHC", &predicted, &experimental);

        assert_eq!(deviations.len(), 2);
    }
}
