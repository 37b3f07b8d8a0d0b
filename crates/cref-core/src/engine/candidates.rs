use super::context::PredictionContext;
use super::state::JobState;
use crate::core::collaborators::LookupError;
use crate::core::models::candidate::{CandidateStructure, ReferenceChain};
use crate::core::models::fragment::Fragment;
use crate::core::models::hit::{HomologyHit, rank_hits};
use crate::core::models::secondary::{SecondaryStructure, to_fragment_labels};
use crate::core::models::torsion::{ChainTorsionProfile, TorsionPair};
use std::fmt;
use tracing::{debug, info};

/// Why a hit did not become a template.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Excluded,
    PreviouslyFailed,
    LookupFailed(String),
    SubjectNotFound,
    CentralOutOfRange,
    CentralBeyondChain,
    UnresolvedAngles,
    MissingReferenceChain,
    IdentityAboveThreshold { identity: f64 },
    EmptyWindow,
    WindowMissesCentral,
}

impl SkipReason {
    /// Whether the hit's coordinates contradict the structure, which bans the structure for
    /// the rest of the job.
    pub fn marks_structure_failed(&self) -> bool {
        matches!(
            self,
            SkipReason::CentralBeyondChain | SkipReason::WindowMissesCentral
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Excluded => f.write_str("structure excluded by configuration"),
            SkipReason::PreviouslyFailed => f.write_str("structure failed earlier in this job"),
            SkipReason::LookupFailed(reason) => write!(f, "torsion lookup failed: {}", reason),
            SkipReason::SubjectNotFound => {
                f.write_str("aligned subject not found in structure residues")
            }
            SkipReason::CentralOutOfRange => {
                f.write_str("central residue precedes the aligned subject")
            }
            SkipReason::CentralBeyondChain => {
                f.write_str("central residue lies past the end of the structure")
            }
            SkipReason::UnresolvedAngles => f.write_str("central residue has unresolved angles"),
            SkipReason::MissingReferenceChain => f.write_str("reference chain is unknown"),
            SkipReason::IdentityAboveThreshold { identity } => {
                write!(f, "global identity {:.2}% above threshold", identity)
            }
            SkipReason::EmptyWindow => f.write_str("aligned window starts before the chain"),
            SkipReason::WindowMissesCentral => {
                f.write_str("aligned window does not reach the central residue")
            }
        }
    }
}

/// Result of evaluating a single hit against a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum HitOutcome {
    Accepted(Box<CandidateStructure>),
    Skipped(SkipReason),
}

/// Ranks `hits` and turns them into at most `max_templates` templates for `fragment`.
///
/// Hits are visited best-first; skipped hits never consume a slot and the loop stops as
/// soon as the cap is reached.
pub fn select_candidates(
    fragment: &Fragment<'_>,
    mut hits: Vec<HomologyHit>,
    context: &PredictionContext<'_>,
    state: &mut JobState,
) -> Vec<CandidateStructure> {
    rank_hits(&mut hits);

    let max_templates = context.config.max_templates;
    let mut candidates = Vec::with_capacity(max_templates.min(hits.len()));
    let mut skipped = 0usize;

    for hit in &hits {
        if candidates.len() >= max_templates {
            break;
        }
        match evaluate_hit(fragment, hit, context, state) {
            HitOutcome::Accepted(candidate) => candidates.push(*candidate),
            HitOutcome::Skipped(SkipReason::Excluded) => {
                skipped += 1;
                info!(
                    structure = %hit.structure_id.to_ascii_uppercase(),
                    "Skipping structure given in the exclusion list"
                );
            }
            HitOutcome::Skipped(reason) => {
                skipped += 1;
                debug!(
                    structure = %hit.structure_id,
                    chain = %hit.chain,
                    %reason,
                    "Skipping hit"
                );
            }
        }
    }

    debug!(
        fragment = fragment.residues,
        hits = hits.len(),
        accepted = candidates.len(),
        skipped,
        "Selected templates"
    );
    candidates
}

/// Evaluates one hit: resolves the structure's torsions, maps the fragment's central residue
/// onto the structure and applies the configured filters.
pub fn evaluate_hit(
    fragment: &Fragment<'_>,
    hit: &HomologyHit,
    context: &PredictionContext<'_>,
    state: &mut JobState,
) -> HitOutcome {
    let config = context.config;
    if config.is_excluded(&hit.structure_id) {
        return HitOutcome::Skipped(SkipReason::Excluded);
    }
    if state.torsions.is_failed(&hit.structure_id) {
        return HitOutcome::Skipped(SkipReason::PreviouslyFailed);
    }

    let profile = match state
        .torsions
        .get_angles(&hit.structure_id, context.collaborators.torsions)
    {
        Ok(profile) => profile,
        Err(LookupError::PreviouslyFailed(_)) => {
            return HitOutcome::Skipped(SkipReason::PreviouslyFailed);
        }
        Err(e) => return HitOutcome::Skipped(SkipReason::LookupFailed(e.to_string())),
    };

    let angles = match central_angles(profile, hit, fragment.central_index()) {
        Ok(angles) => angles,
        Err(reason) => return skip(reason, hit, state),
    };

    let Some(reference) = context
        .collaborators
        .references
        .reference_chain(&hit.structure_id, &hit.chain)
    else {
        return HitOutcome::Skipped(SkipReason::MissingReferenceChain);
    };
    let window = aligned_window(&reference, hit, fragment.len());

    let global_identity = if config.identity_filter_enabled() {
        let identity = state.identities.estimate(
            &hit.structure_id,
            &hit.chain,
            context.target,
            &reference.sequence,
        );
        if identity > config.identity_threshold {
            info!(
                structure = %hit.structure_id.to_ascii_uppercase(),
                chain = %hit.chain,
                identity = format_args!("{:.2}", identity),
                threshold = config.identity_threshold,
                "Skipping template above identity threshold"
            );
            return HitOutcome::Skipped(SkipReason::IdentityAboveThreshold { identity });
        }
        Some(identity)
    } else {
        None
    };

    let (subject_full, subject_labels) = match window {
        Ok(window) => window,
        Err(reason) => return skip(reason, hit, state),
    };
    let central_class = subject_labels
        .chars()
        .nth(fragment.central_index())
        .map(SecondaryStructure::from_code)
        .unwrap_or(SecondaryStructure::Coil);

    HitOutcome::Accepted(Box::new(CandidateStructure {
        structure_id: hit.structure_id.clone(),
        chain: hit.chain.clone(),
        fragment: fragment.residues.to_string(),
        fragment_labels: fragment.labels.to_string(),
        subject: hit.subject.clone(),
        subject_full,
        subject_labels: to_fragment_labels(&subject_labels),
        central_class,
        central_residue: angles.0,
        identity: fragment_identity(hit.identities, fragment.len()),
        global_identity,
        score: hit.score,
        angles: angles.1,
    }))
}

fn skip(reason: SkipReason, hit: &HomologyHit, state: &mut JobState) -> HitOutcome {
    if reason.marks_structure_failed() {
        debug!(structure = %hit.structure_id, %reason, "Marking structure as failed");
        state.torsions.mark_failed(&hit.structure_id);
    }
    HitOutcome::Skipped(reason)
}

/// Residue and (phi, psi) of the structure position aligned to the fragment's central
/// residue.
fn central_angles(
    profile: &ChainTorsionProfile,
    hit: &HomologyHit,
    central: usize,
) -> Result<(char, TorsionPair), SkipReason> {
    let within_subject = (central + 1)
        .checked_sub(hit.query_start)
        .ok_or(SkipReason::CentralOutOfRange)?;
    let subject_offset = profile
        .locate(&hit.subject)
        .ok_or(SkipReason::SubjectNotFound)?;
    let (residue, phi, psi) = profile
        .angles_at(subject_offset + within_subject)
        .ok_or(SkipReason::CentralBeyondChain)?;
    match (phi, psi) {
        (Some(phi), Some(psi)) => Ok((residue, TorsionPair::new(round2(phi), round2(psi)))),
        _ => Err(SkipReason::UnresolvedAngles),
    }
}

/// Reference residues and raw labels covering the whole fragment, flanks included.
///
/// The window is `[subject_start - query_start, subject_end + size - query_end)` in
/// 0-based chain coordinates, clipped at the chain end. A window starting before the chain
/// is [`SkipReason::EmptyWindow`]; one that is empty or does not reach the central residue
/// is [`SkipReason::WindowMissesCentral`].
fn aligned_window(
    reference: &ReferenceChain,
    hit: &HomologyHit,
    fragment_size: usize,
) -> Result<(String, String), SkipReason> {
    let start = hit
        .subject_start
        .checked_sub(hit.query_start)
        .ok_or(SkipReason::EmptyWindow)?;
    let end = (hit.subject_end + fragment_size)
        .saturating_sub(hit.query_end)
        .min(reference.labels.len());
    if start >= end || end - start <= fragment_size / 2 {
        return Err(SkipReason::WindowMissesCentral);
    }
    let sequence_end = end.min(reference.sequence.len());
    let residues = reference
        .sequence
        .get(start..sequence_end)
        .ok_or(SkipReason::WindowMissesCentral)?;
    let labels = reference
        .labels
        .get(start..end)
        .ok_or(SkipReason::WindowMissesCentral)?;
    Ok((residues.to_string(), labels.to_string()))
}

fn fragment_identity(identities: usize, fragment_size: usize) -> u32 {
    (100.0 * identities as f64 / fragment_size as f64).round_ties_even() as u32
}

fn round2(angle: f64) -> f64 {
    (angle * 100.0).round() / 100.0
}
