use super::error::ReportError;
use crate::core::models::candidate::CandidateStructure;
use crate::core::models::torsion::TorsionPair;
use serde::Serialize;
use std::io::Write;

/// Global identity written for candidates that were not evaluated.
pub const IDENTITY_NOT_EVALUATED: f64 = -1.0;

#[derive(Debug, Serialize)]
struct AngleRow {
    index: usize,
    residue: char,
    secondary_structure: char,
    phi: f64,
    psi: f64,
    quality: f64,
}

#[derive(Debug, Serialize)]
struct TemplateRow<'a> {
    fragment_index: usize,
    pdb: &'a str,
    chain: &'a str,
    fragment: &'a str,
    subject: &'a str,
    subject_full: &'a str,
    fragment_ss: &'a str,
    subject_ss: &'a str,
    central_ss: char,
    identity: u32,
    global_identity: f64,
    score: f64,
    phi: f64,
    psi: f64,
}

/// Writes one row per residue with its predicted angles and cluster quality.
pub fn write_angles<W: Write>(
    writer: W,
    sequence: &str,
    labels: &str,
    angles: &[TorsionPair],
    qualities: &[f64],
) -> Result<(), ReportError> {
    if angles.len() != sequence.len()
        || qualities.len() != sequence.len()
        || labels.len() != sequence.len()
    {
        return Err(ReportError::Inconsistent(format!(
            "{} residues, {} labels, {} angle pairs, {} quality scores",
            sequence.len(),
            labels.len(),
            angles.len(),
            qualities.len()
        )));
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, ((residue, label), (pair, quality))) in sequence
        .chars()
        .zip(labels.chars())
        .zip(angles.iter().zip(qualities))
        .enumerate()
    {
        csv_writer.serialize(AngleRow {
            index: index + 1,
            residue,
            secondary_structure: label,
            phi: pair.phi,
            psi: pair.psi,
            quality: *quality,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes every accepted template of every fragment, in fragment order.
pub fn write_templates<'a, W, I>(writer: W, fragments: I) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = (usize, &'a [CandidateStructure])>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (fragment_index, candidates) in fragments {
        for candidate in candidates {
            csv_writer.serialize(TemplateRow {
                fragment_index,
                pdb: &candidate.structure_id,
                chain: &candidate.chain,
                fragment: &candidate.fragment,
                subject: &candidate.subject,
                subject_full: &candidate.subject_full,
                fragment_ss: &candidate.fragment_labels,
                subject_ss: &candidate.subject_labels,
                central_ss: candidate.central_class.code(),
                identity: candidate.identity,
                global_identity: candidate
                    .global_identity
                    .unwrap_or(IDENTITY_NOT_EVALUATED),
                score: candidate.score,
                phi: candidate.angles.phi,
                psi: candidate.angles.psi,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the run parameters as TOML.
pub fn write_parameters<W: Write, T: Serialize>(
    mut writer: W,
    parameters: &T,
) -> Result<(), ReportError> {
    let content = toml::to_string_pretty(parameters)?;
    writer.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::secondary::SecondaryStructure;

    fn candidate(global_identity: Option<f64>) -> CandidateStructure {
        CandidateStructure {
            structure_id: "1abc".to_string(),
            chain: "A".to_string(),
            fragment: "MKVLA".to_string(),
            fragment_labels: "-HHH-".to_string(),
            subject: "MKVLA".to_string(),
            subject_full: "MKVLA".to_string(),
            subject_labels: "-HHHH".to_string(),
            central_class: SecondaryStructure::Helix,
            central_residue: 'V',
            identity: 100,
            global_identity,
            score: 25.0,
            angles: TorsionPair::new(-63.5, -41.25),
        }
    }

    #[test]
    fn write_angles_emits_one_row_per_residue() {
        let mut buffer = Vec::new();
        write_angles(
            &mut buffer,
            "MKV",
            "-H-",
            &[
                TorsionPair::UNRESOLVED,
                TorsionPair::new(-60.0, -45.0),
                TorsionPair::UNRESOLVED,
            ],
            &[f64::NAN, 1.5, f64::NAN],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "index,residue,secondary_structure,phi,psi,quality");
        assert_eq!(lines[2], "2,K,H,-60.0,-45.0,1.5");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn write_angles_rejects_inconsistent_lengths() {
        let result = write_angles(Vec::new(), "MKV", "---", &[TorsionPair::UNRESOLVED], &[0.0]);
        assert!(matches!(result, Err(ReportError::Inconsistent(_))));
    }

    #[test]
    fn write_templates_marks_unevaluated_identity_with_sentinel() {
        let first = vec![candidate(None)];
        let second = vec![candidate(Some(42.5))];
        let mut buffer = Vec::new();
        write_templates(
            &mut buffer,
            vec![(0, first.as_slice()), (1, second.as_slice())],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("fragment_index,pdb,chain"));
        assert!(lines[1].contains(",-1.0,"));
        assert!(lines[2].contains(",42.5,"));
        assert!(lines[2].starts_with("1,1abc,A,MKVLA"));
    }

    #[test]
    fn write_parameters_serializes_as_toml() {
        #[derive(Serialize)]
        struct Params {
            fragment_size: usize,
        }
        let mut buffer = Vec::new();
        write_parameters(&mut buffer, &Params { fragment_size: 5 }).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "fragment_size = 5");
    }
}
