use super::hits::{TABULAR_FORMAT, read_tabular};
use crate::core::collaborators::{HomologySearch, SearchError};
use crate::core::models::hit::HomologyHit;
use crate::core::models::search::{GapCosts, SearchParameters};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::debug;

/// Runs a local `blastp` against a PDB seqres database for every fragment.
#[derive(Debug, Clone)]
pub struct BlastSearch {
    executable: PathBuf,
    database: PathBuf,
}

impl BlastSearch {
    pub fn new(executable: impl Into<PathBuf>, database: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            database: database.into(),
        }
    }

    /// Command-line arguments for one search; the query is read from standard input.
    pub fn arguments(&self, parameters: &SearchParameters) -> Vec<String> {
        let mut args = vec![
            "-db".to_string(),
            self.database.to_string_lossy().to_string(),
            "-outfmt".to_string(),
            TABULAR_FORMAT.to_string(),
            "-evalue".to_string(),
            parameters.expect_threshold.to_string(),
            "-word_size".to_string(),
            parameters.word_size.to_string(),
            "-matrix".to_string(),
            parameters.matrix.clone(),
            "-max_target_seqs".to_string(),
            parameters.number_of_alignments.to_string(),
        ];
        match parameters.gap_costs {
            GapCosts::Ungapped => args.push("-ungapped".to_string()),
            GapCosts::Affine { open, extend } => {
                args.push("-gapopen".to_string());
                args.push(open.to_string());
                args.push("-gapextend".to_string());
                args.push(extend.to_string());
            }
        }
        args
    }
}

impl HomologySearch for BlastSearch {
    fn search(
        &self,
        fragment: &str,
        parameters: &SearchParameters,
    ) -> Result<Vec<HomologyHit>, SearchError> {
        let args = self.arguments(parameters);
        debug!("Running {:?} {}", self.executable, args.join(" "));

        let mut child = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = write!(stdin, ">fragment\n{}\n", fragment) {
                drop(stdin);
                return Err(abandon(&mut child, e));
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(SearchError::Execution(format!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(read_tabular(output.stdout.as_slice())?
            .into_iter()
            .map(|(_, hit)| hit)
            .collect())
    }
}

/// Kills and reaps a search process whose query could not be delivered.
fn abandon(child: &mut Child, error: io::Error) -> SearchError {
    debug!("Could not send query to search process: {}", error);
    if let Err(e) = child.kill() {
        debug!("Search process already exited: {}", e);
    }
    if let Err(e) = child.wait() {
        debug!("Failed to reap search process: {}", e);
    }
    SearchError::from(error)
}
