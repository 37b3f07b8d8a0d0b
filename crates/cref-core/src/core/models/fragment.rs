use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FragmentError {
    #[error("Fragment size must be at least 1")]
    ZeroSize,
    #[error("Fragment size {fragment_size} exceeds sequence length {sequence_length}")]
    TooLong {
        fragment_size: usize,
        sequence_length: usize,
    },
    #[error("Labeling has {labels} symbols but the sequence has {residues} residues")]
    LengthMismatch { residues: usize, labels: usize },
    #[error("Sequence and labeling must be ASCII")]
    NonAscii,
}

/// A fixed-width window over the target sequence and its parallel labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub offset: usize,
    pub residues: &'a str,
    pub labels: &'a str,
}

impl<'a> Fragment<'a> {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Index of the central residue inside the fragment (`floor(len / 2)`).
    pub fn central_index(&self) -> usize {
        self.residues.len() / 2
    }

    /// Position of the central residue in the full sequence.
    pub fn target_position(&self) -> usize {
        self.offset + self.central_index()
    }

    pub fn central_residue(&self) -> char {
        self.residues.as_bytes()[self.central_index()] as char
    }

    pub fn central_label(&self) -> char {
        self.labels.as_bytes()[self.central_index()] as char
    }
}

/// Sliding window of stride 1 over a sequence and its labeling.
///
/// The iterator is cheap to clone; clone it before consuming to traverse the windows again.
#[derive(Debug, Clone)]
pub struct FragmentWindows<'a> {
    residues: &'a str,
    labels: &'a str,
    size: usize,
    next_offset: usize,
}

pub fn validate_fragment_size(sequence_length: usize, size: usize) -> Result<(), FragmentError> {
    if size == 0 {
        return Err(FragmentError::ZeroSize);
    }
    if size > sequence_length {
        return Err(FragmentError::TooLong {
            fragment_size: size,
            sequence_length,
        });
    }
    Ok(())
}

/// Splits `residues` and the index-aligned `labels` into overlapping windows of `size`.
///
/// Yields exactly `len - size + 1` fragments.
pub fn fragments<'a>(
    residues: &'a str,
    labels: &'a str,
    size: usize,
) -> Result<FragmentWindows<'a>, FragmentError> {
    if !residues.is_ascii() || !labels.is_ascii() {
        return Err(FragmentError::NonAscii);
    }
    if residues.len() != labels.len() {
        return Err(FragmentError::LengthMismatch {
            residues: residues.len(),
            labels: labels.len(),
        });
    }
    validate_fragment_size(residues.len(), size)?;
    Ok(FragmentWindows {
        residues,
        labels,
        size,
        next_offset: 0,
    })
}

impl<'a> Iterator for FragmentWindows<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.next_offset;
        let end = offset + self.size;
        if end > self.residues.len() {
            return None;
        }
        self.next_offset += 1;
        Some(Fragment {
            offset,
            residues: &self.residues[offset..end],
            labels: &self.labels[offset..end],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.residues.len() + 1).saturating_sub(self.next_offset + self.size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FragmentWindows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_yields_every_offset_once() {
        let windows: Vec<_> = fragments("ACDEFGH", "HHHEEE-", 5).unwrap().collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].residues, "ACDEF");
        assert_eq!(windows[1].residues, "CDEFG");
        assert_eq!(windows[2].residues, "DEFGH");
        assert_eq!(windows[2].labels, "HEEE-");
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.offset, i);
            assert_eq!(w.len(), 5);
        }
    }

    #[test]
    fn consecutive_windows_overlap_by_size_minus_one() {
        let windows: Vec<_> = fragments("MKVLAAGIVG", "----------", 4).unwrap().collect();
        for pair in windows.windows(2) {
            assert_eq!(&pair[0].residues[1..], &pair[1].residues[..3]);
        }
    }

    #[test]
    fn fragment_count_matches_length_minus_size_plus_one() {
        let seq = "ACDEFGHIKLMNPQRSTVWY";
        let labels = "H".repeat(seq.len());
        for size in 1..=seq.len() {
            let iter = fragments(seq, &labels, size).unwrap();
            assert_eq!(iter.len(), seq.len() - size + 1);
            assert_eq!(iter.count(), seq.len() - size + 1);
        }
    }

    #[test]
    fn iterator_is_restartable_through_clone() {
        let iter = fragments("ACDEFG", "HHHHHH", 3).unwrap();
        let first: Vec<_> = iter.clone().map(|f| f.residues).collect();
        let second: Vec<_> = iter.map(|f| f.residues).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn central_index_and_target_position_follow_floor_of_half() {
        let mut iter = fragments("ACDEFGH", "HHEE--H", 5).unwrap();
        let second = iter.nth(1).unwrap();
        assert_eq!(second.central_index(), 2);
        assert_eq!(second.target_position(), 3);
        assert_eq!(second.central_residue(), 'E');
        assert_eq!(second.central_label(), 'E');

        let even = fragments("ACDE", "HHHH", 4).unwrap().next().unwrap();
        assert_eq!(even.central_index(), 2);
    }

    #[test]
    fn fragment_longer_than_sequence_is_a_configuration_error() {
        let err = fragments("ACD", "HHH", 5).unwrap_err();
        assert_eq!(
            err,
            FragmentError::TooLong {
                fragment_size: 5,
                sequence_length: 3
            }
        );
    }

    #[test]
    fn zero_size_and_mismatched_labels_are_rejected() {
        assert_eq!(
            fragments("ACD", "HHH", 0).unwrap_err(),
            FragmentError::ZeroSize
        );
        assert_eq!(
            fragments("ACD", "HH", 2).unwrap_err(),
            FragmentError::LengthMismatch {
                residues: 3,
                labels: 2
            }
        );
    }

    #[test]
    fn fragment_equal_to_sequence_length_yields_single_window() {
        let windows: Vec<_> = fragments("ACDEF", "HHHHH", 5).unwrap().collect();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].residues, "ACDEF");
    }
}
