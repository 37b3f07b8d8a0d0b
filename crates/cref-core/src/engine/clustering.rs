use crate::core::models::candidate::CandidateStructure;
use crate::core::models::secondary::SecondaryStructure;
use crate::core::models::torsion::TorsionPair;
use nalgebra::{Point2, Vector2};

const MAX_ITERATIONS: usize = 100;

/// Which templates the representative was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterSelection {
    /// Templates whose central class matches the fragment's predicted class.
    MatchingClass,
    /// No template matched the predicted class, so all of them were clustered.
    AllCandidates,
    /// No template at all; the angles are the unresolved placeholder.
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterResult {
    pub angles: TorsionPair,
    /// Mean squared distance of the winning cluster's points to its centroid. Lower is
    /// tighter; `NaN` when there was nothing to cluster.
    pub quality: f64,
    pub cluster_size: usize,
    pub selection: ClusterSelection,
}

impl ClusterResult {
    pub fn unresolved() -> Self {
        Self {
            angles: TorsionPair::UNRESOLVED,
            quality: f64::NAN,
            cluster_size: 0,
            selection: ClusterSelection::Unresolved,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub centroids: Vec<Point2<f64>>,
    pub assignments: Vec<usize>,
}

impl Partition {
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &cluster in &self.assignments {
            sizes[cluster] += 1;
        }
        sizes
    }
}

/// Picks the representative (phi, psi) of a fragment's central residue from its templates.
pub fn select_representative(
    candidates: &[CandidateStructure],
    fragment_class: SecondaryStructure,
    number_of_clusters: usize,
) -> ClusterResult {
    let matching: Vec<_> = candidates
        .iter()
        .filter(|c| c.central_class == fragment_class)
        .map(|c| Point2::new(c.angles.phi, c.angles.psi))
        .collect();

    let (points, selection) = if !matching.is_empty() {
        (matching, ClusterSelection::MatchingClass)
    } else if !candidates.is_empty() {
        let all = candidates
            .iter()
            .map(|c| Point2::new(c.angles.phi, c.angles.psi))
            .collect();
        (all, ClusterSelection::AllCandidates)
    } else {
        return ClusterResult::unresolved();
    };

    let partition = kmeans(&points, number_of_clusters);
    let sizes = partition.cluster_sizes();
    let mut winner = 0;
    for (cluster, &size) in sizes.iter().enumerate() {
        if size > sizes[winner] {
            winner = cluster;
        }
    }

    let centroid = partition.centroids[winner];
    let members: Vec<_> = points
        .iter()
        .zip(&partition.assignments)
        .filter(|(_, cluster)| **cluster == winner)
        .map(|(point, _)| point)
        .collect();
    let quality = members
        .iter()
        .map(|point| (**point - centroid).norm_squared())
        .sum::<f64>()
        / members.len() as f64;

    ClusterResult {
        angles: TorsionPair::new(centroid.x, centroid.y),
        quality,
        cluster_size: members.len(),
        selection,
    }
}

/// Partitions `points` into at most `k` clusters with Lloyd's algorithm.
///
/// Seeds are chosen deterministically: the first point, then repeatedly the point farthest
/// from every seed chosen so far. `k` is clamped to the number of points.
pub fn kmeans(points: &[Point2<f64>], k: usize) -> Partition {
    let k = k.min(points.len()).max(1);
    if points.is_empty() {
        return Partition {
            centroids: Vec::new(),
            assignments: Vec::new(),
        };
    }

    let mut centroids = farthest_point_seeds(points, k);
    let mut assignments = vec![usize::MAX; points.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
            let nearest = nearest_centroid(point, &centroids);
            if *assignment != nearest {
                *assignment = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![Vector2::zeros(); k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in points.iter().zip(&assignments) {
            sums[cluster] += point.coords;
            counts[cluster] += 1;
        }
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            // Empty clusters keep their previous centroid.
            if counts[cluster] > 0 {
                *centroid = Point2::from(sums[cluster] / counts[cluster] as f64);
            }
        }
    }

    Partition {
        centroids,
        assignments,
    }
}

fn farthest_point_seeds(points: &[Point2<f64>], k: usize) -> Vec<Point2<f64>> {
    let mut seeds = Vec::with_capacity(k);
    seeds.push(points[0]);
    while seeds.len() < k {
        let mut best_idx = 0;
        let mut best_min_dist = 0.0;
        for (i, point) in points.iter().enumerate() {
            let min_dist = seeds
                .iter()
                .map(|seed| (point - seed).norm_squared())
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_min_dist {
                best_min_dist = min_dist;
                best_idx = i;
            }
        }
        seeds.push(points[best_idx]);
    }
    seeds
}

fn nearest_centroid(point: &Point2<f64>, centroids: &[Point2<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (cluster, centroid) in centroids.iter().enumerate() {
        let dist = (point - centroid).norm_squared();
        if dist < best_dist {
            best_dist = dist;
            best = cluster;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(class: SecondaryStructure, phi: f64, psi: f64) -> CandidateStructure {
        CandidateStructure {
            structure_id: "1abc".to_string(),
            chain: "A".to_string(),
            fragment: "MKVLA".to_string(),
            fragment_labels: "HHHHH".to_string(),
            subject: "MKVLA".to_string(),
            subject_full: "MKVLA".to_string(),
            subject_labels: "HHHHH".to_string(),
            central_class: class,
            central_residue: 'V',
            identity: 100,
            global_identity: None,
            score: 10.0,
            angles: TorsionPair::new(phi, psi),
        }
    }

    #[test]
    fn no_candidates_yield_unresolved_placeholder() {
        let result = select_representative(&[], SecondaryStructure::Helix, 8);
        assert_eq!(result.angles, TorsionPair::UNRESOLVED);
        assert!(result.quality.is_nan());
        assert_eq!(result.cluster_size, 0);
        assert_eq!(result.selection, ClusterSelection::Unresolved);
    }

    #[test]
    fn single_candidate_is_returned_exactly() {
        let candidates = [candidate(SecondaryStructure::Helix, -63.17, -41.93)];
        let result = select_representative(&candidates, SecondaryStructure::Helix, 8);
        assert_eq!(result.angles, TorsionPair::new(-63.17, -41.93));
        assert_eq!(result.quality, 0.0);
        assert_eq!(result.cluster_size, 1);
        assert_eq!(result.selection, ClusterSelection::MatchingClass);
    }

    #[test]
    fn only_matching_class_is_clustered_when_present() {
        let candidates = [
            candidate(SecondaryStructure::Strand, -120.0, 130.0),
            candidate(SecondaryStructure::Helix, -60.0, -40.0),
            candidate(SecondaryStructure::Strand, -125.0, 135.0),
        ];
        let result = select_representative(&candidates, SecondaryStructure::Helix, 8);
        assert_eq!(result.angles, TorsionPair::new(-60.0, -40.0));
        assert_eq!(result.selection, ClusterSelection::MatchingClass);
    }

    #[test]
    fn falls_back_to_all_candidates_without_class_match() {
        let candidates = [
            candidate(SecondaryStructure::Strand, -120.0, 130.0),
            candidate(SecondaryStructure::Strand, -124.0, 134.0),
        ];
        let result = select_representative(&candidates, SecondaryStructure::Coil, 1);
        assert_eq!(result.selection, ClusterSelection::AllCandidates);
        assert_eq!(result.angles, TorsionPair::new(-122.0, 132.0));
        assert_eq!(result.cluster_size, 2);
        assert_eq!(result.quality, 8.0);
    }

    #[test]
    fn largest_cluster_wins() {
        let candidates = [
            candidate(SecondaryStructure::Helix, -60.0, -40.0),
            candidate(SecondaryStructure::Helix, 60.0, 40.0),
            candidate(SecondaryStructure::Helix, -62.0, -42.0),
            candidate(SecondaryStructure::Helix, -64.0, -44.0),
        ];
        let result = select_representative(&candidates, SecondaryStructure::Helix, 2);
        assert_eq!(result.cluster_size, 3);
        assert_eq!(result.angles, TorsionPair::new(-62.0, -42.0));
    }

    #[test]
    fn tighter_clusters_score_lower() {
        let tight = [
            candidate(SecondaryStructure::Helix, -60.0, -40.0),
            candidate(SecondaryStructure::Helix, -61.0, -41.0),
        ];
        let loose = [
            candidate(SecondaryStructure::Helix, -50.0, -30.0),
            candidate(SecondaryStructure::Helix, -70.0, -50.0),
        ];
        let tight = select_representative(&tight, SecondaryStructure::Helix, 1);
        let loose = select_representative(&loose, SecondaryStructure::Helix, 1);
        assert!(tight.quality < loose.quality);
    }

    #[test]
    fn kmeans_clamps_cluster_count_to_point_count() {
        let points = [Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)];
        let partition = kmeans(&points, 8);
        assert_eq!(partition.centroids.len(), 2);
        assert_eq!(partition.cluster_sizes(), vec![1, 1]);
    }

    #[test]
    fn kmeans_handles_duplicate_points() {
        let points = [Point2::new(5.0, 5.0); 3];
        let partition = kmeans(&points, 3);
        assert_eq!(partition.assignments, vec![0, 0, 0]);
        assert_eq!(partition.centroids[0], Point2::new(5.0, 5.0));
    }
}
