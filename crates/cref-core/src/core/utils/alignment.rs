/// Outcome of a global alignment scored with match = 1, mismatch = 0 and free gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalAlignment {
    pub matches: usize,
    /// Number of alignment columns, gaps included.
    pub length: usize,
}

impl GlobalAlignment {
    /// Percent identity, `100 * matches / length`.
    pub fn identity(&self) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        100.0 * self.matches as f64 / self.length as f64
    }
}

/// Globally aligns two sequences maximising the number of identical columns.
///
/// The optimal score equals the longest common subsequence. Among optimal alignments the
/// traceback prefers pairing residues over opening gaps, so the reported length is the
/// most compact one.
pub fn align_global(a: &str, b: &str) -> GlobalAlignment {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    let mut score = vec![0u32; (n + 1) * width];

    for i in 1..=n {
        for j in 1..=m {
            let diagonal = score[(i - 1) * width + j - 1] + u32::from(a[i - 1] == b[j - 1]);
            let up = score[(i - 1) * width + j];
            let left = score[i * width + j - 1];
            score[i * width + j] = diagonal.max(up).max(left);
        }
    }

    let (mut i, mut j) = (n, m);
    let mut matches = 0;
    let mut length = 0;
    while i > 0 && j > 0 {
        let current = score[i * width + j];
        let is_match = a[i - 1] == b[j - 1];
        if current == score[(i - 1) * width + j - 1] + u32::from(is_match) {
            matches += usize::from(is_match);
            i -= 1;
            j -= 1;
        } else if current == score[(i - 1) * width + j] {
            i -= 1;
        } else {
            j -= 1;
        }
        length += 1;
    }
    length += i + j;

    GlobalAlignment { matches, length }
}
