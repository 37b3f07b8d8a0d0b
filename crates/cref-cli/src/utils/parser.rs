use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("No sequence found in input.")]
    EmptySequence,

    #[error("Input holds {0} FASTA records; only a single target sequence is supported.")]
    MultipleRecords(usize),

    #[error("Structure id '{0}' cannot be empty.")]
    EmptyStructureId(String),
}

/// Extracts the target sequence from FASTA text or from bare one-letter codes.
///
/// Header lines (`>`) and comment lines (`;`) are skipped and the remaining lines joined.
pub fn parse_sequence_text(content: &str) -> Result<String, ParseError> {
    let records = content
        .lines()
        .filter(|line| line.trim_start().starts_with('>'))
        .count();
    if records > 1 {
        return Err(ParseError::MultipleRecords(records));
    }

    let sequence: String = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('>') && !line.starts_with(';'))
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect();

    if sequence.is_empty() {
        return Err(ParseError::EmptySequence);
    }
    Ok(sequence)
}

/// Splits comma-separated structure ids, e.g. `1abc,2XYZ`.
pub fn parse_structure_list(value: &str) -> Result<Vec<String>, ParseError> {
    value
        .split(',')
        .map(|id| {
            let id = id.trim();
            if id.is_empty() {
                Err(ParseError::EmptyStructureId(value.to_string()))
            } else {
                Ok(id.to_string())
            }
        })
        .collect()
}
