use super::compare::{ResidueDeviation, compare_with_experiment};
use crate::core::models::candidate::CandidateStructure;
use crate::core::models::fragment::{fragments, validate_fragment_size};
use crate::core::models::secondary::{SecondaryStructure, to_fragment_labels, to_three_state};
use crate::core::models::sequence::Sequence;
use crate::core::models::torsion::TorsionPair;
use crate::engine::candidates::select_candidates;
use crate::engine::clustering::{ClusterResult, select_representative};
use crate::engine::config::{ConfigError, PredictionConfig};
use crate::engine::context::{Collaborators, PredictionContext};
use crate::engine::error::EngineError;
use crate::engine::progress::{JobStage, Progress, ProgressReporter};
use crate::engine::state::JobState;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Templates and cluster result of one fragment.
#[derive(Debug, Clone)]
pub struct FragmentReport {
    pub offset: usize,
    pub fragment: String,
    pub labels: String,
    pub central_residue: char,
    pub candidates: Vec<CandidateStructure>,
    pub cluster: ClusterResult,
}

#[derive(Debug, Clone)]
pub struct PredictionResult {
    pub sequence: String,
    /// Predicted labeling in three-state (H/E/C) form.
    pub secondary_structure: String,
    /// One (phi, psi) pair per residue; termini hold the unresolved placeholder.
    pub angles: Vec<TorsionPair>,
    /// Cluster quality per residue, `NaN` where nothing was clustered.
    pub qualities: Vec<f64>,
    pub fragments: Vec<FragmentReport>,
    /// Per-residue comparison with the configured reference structure, if any.
    pub deviations: Option<Vec<ResidueDeviation>>,
}

impl PredictionResult {
    pub fn resolved_count(&self) -> usize {
        self.angles.iter().filter(|a| !a.is_unresolved()).count()
    }
}

#[instrument(skip_all, name = "prediction_workflow")]
pub fn run(
    sequence: &Sequence,
    collaborators: Collaborators,
    config: &PredictionConfig,
    state: &mut JobState,
    reporter: &ProgressReporter,
) -> Result<PredictionResult, EngineError> {
    let started = Instant::now();
    let length = sequence.len();
    validate_fragment_size(length, config.fragment_size).map_err(ConfigError::from)?;

    // === Phase 1: Secondary structure ===
    reporter.report(Progress::StageStart(JobStage::PredictingSecondaryStructure));
    let labels = collaborators.predictor.predict(sequence.as_str())?;
    let labels: String = labels.chars().filter(|c| !c.is_whitespace()).collect();
    if labels.chars().count() != length {
        return Err(ConfigError::LabelLength {
            expected: length,
            found: labels.chars().count(),
        }
        .into());
    }
    info!("Seq: {}", sequence);
    info!("Str: {}", labels);
    let secondary_structure = to_three_state(&labels);
    let fragment_labels = to_fragment_labels(&labels);
    reporter.report(Progress::StageFinish);

    // === Phase 2: Templates and clustering, fragment by fragment ===
    let windows = fragments(sequence.as_str(), &fragment_labels, config.fragment_size)
        .map_err(ConfigError::from)?;
    let context = PredictionContext::new(sequence.as_str(), collaborators, config, reporter);
    let central = config.central();
    let trailing = config.fragment_size - 1 - central;

    reporter.report(Progress::StageStart(JobStage::SearchingTemplates));
    reporter.report(Progress::FragmentsStart {
        total: windows.len() as u64,
    });

    let mut angles = vec![TorsionPair::UNRESOLVED; central];
    let mut qualities = vec![f64::NAN; central];
    let mut reports = Vec::with_capacity(windows.len());

    for fragment in windows {
        info!(
            fragment = fragment.residues,
            residue = %fragment.central_residue(),
            "Processing fragment"
        );

        let hits = match collaborators
            .search
            .search(fragment.residues, &config.search)
        {
            Ok(hits) => hits,
            Err(e) => {
                warn!(fragment = fragment.residues, error = %e, "Homology search failed");
                Vec::new()
            }
        };

        let candidates = select_candidates(&fragment, hits, &context, state);
        let fragment_class = SecondaryStructure::from_code(fragment.central_label());
        info!("Clustering {} templates", candidates.len());
        let cluster = select_representative(&candidates, fragment_class, config.number_of_clusters);
        debug!(
            phi = cluster.angles.phi,
            psi = cluster.angles.psi,
            quality = cluster.quality,
            cluster_size = cluster.cluster_size,
            selection = ?cluster.selection,
            "Representative angles"
        );

        angles.push(cluster.angles);
        qualities.push(cluster.quality);
        reporter.report(Progress::FragmentDone {
            offset: fragment.offset,
            templates: candidates.len(),
        });
        reports.push(FragmentReport {
            offset: fragment.offset,
            fragment: fragment.residues.to_string(),
            labels: fragment.labels.to_string(),
            central_residue: fragment.central_residue(),
            candidates,
            cluster,
        });
    }

    angles.extend(std::iter::repeat_n(TorsionPair::UNRESOLVED, trailing));
    qualities.extend(std::iter::repeat_n(f64::NAN, trailing));
    reporter.report(Progress::FragmentsFinish);
    reporter.report(Progress::StageFinish);

    if angles.len() != length {
        return Err(EngineError::Internal(format!(
            "assembled {} angle pairs for {} residues",
            angles.len(),
            length
        )));
    }

    // === Phase 3: Optional comparison with the experimental structure ===
    let deviations = config.reference_structure.as_deref().and_then(|reference| {
        reporter.report(Progress::StageStart(JobStage::Benchmarking));
        let deviations = benchmark(
            reference,
            sequence.as_str(),
            &secondary_structure,
            &angles,
            collaborators,
            state,
        );
        reporter.report(Progress::StageFinish);
        deviations
    });

    info!(
        structures = state.torsions.len(),
        failed = state.torsions.failed_count(),
        "Torsion cache summary"
    );
    log_elapsed(started);

    Ok(PredictionResult {
        sequence: sequence.as_str().to_string(),
        secondary_structure,
        angles,
        qualities,
        fragments: reports,
        deviations,
    })
}

fn benchmark(
    reference: &str,
    sequence: &str,
    labels: &str,
    angles: &[TorsionPair],
    collaborators: Collaborators,
    state: &mut JobState,
) -> Option<Vec<ResidueDeviation>> {
    let profile = match state.torsions.get_angles(reference, collaborators.torsions) {
        Ok(profile) => profile,
        Err(e) => {
            warn!(structure = reference, error = %e, "Cannot compare with reference structure");
            return None;
        }
    };

    let deviations = compare_with_experiment(sequence, labels, angles, profile);
    info!("Dihedral angles");
    info!("aa_seq\tss_seq\tphi_exp\tphi_prd\tphi_dif\tpsi_exp\tpsi_prd\tpsi_dif");
    for d in &deviations {
        info!(
            "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            d.residue,
            d.label,
            d.experimental.phi,
            d.predicted.phi,
            d.phi_difference,
            d.experimental.psi,
            d.predicted.psi,
            d.psi_difference
        );
    }
    Some(deviations)
}

fn log_elapsed(started: Instant) {
    let seconds = started.elapsed().as_secs_f64();
    if seconds > 60.0 {
        info!("Prediction took {:.2} minutes", seconds / 60.0);
    } else {
        info!("Prediction took {:.2} seconds", seconds);
    }
}
