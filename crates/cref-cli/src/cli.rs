use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "CReF++ Developers",
    version,
    about = "CReF++ CLI - Fragment-based prediction of protein backbone torsion angles from homologous templates.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict per-residue (phi, psi) angles of a sequence from fragment templates.
    Predict(PredictArgs),
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    // --- Core Arguments ---
    /// Path to the target sequence, in FASTA or as plain one-letter codes.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory that receives the angle, template and parameter reports.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Prediction Overrides ---
    /// Override the fragment size (odd sizes center the predicted residue).
    #[arg(short = 'f', long, value_name = "INT")]
    pub fragment_size: Option<usize>,

    /// Override the number of k-means clusters per fragment.
    #[arg(short = 'k', long, value_name = "INT")]
    pub clusters: Option<usize>,

    /// Override the maximum number of templates kept per fragment.
    #[arg(short = 't', long, value_name = "INT")]
    pub max_templates: Option<usize>,

    /// Exclude structures from the templates. Accepts comma-separated ids and may be repeated.
    #[arg(short = 'x', long = "exclude", value_name = "ID[,ID...]")]
    pub exclude: Vec<String>,

    /// Skip templates whose fragment identity is at or above this percentage (0 disables).
    #[arg(long, value_name = "PERCENT")]
    pub identity_threshold: Option<f64>,

    /// Compare the prediction with the experimental angles of this structure.
    #[arg(short = 'r', long, value_name = "ID")]
    pub reference_structure: Option<String>,

    // --- Data Sources ---
    /// Directory of per-structure torsion tables (`<id>.csv`).
    #[arg(long, value_name = "DIR")]
    pub torsions: Option<PathBuf>,

    /// CSV of reference chains with their sequences and DSSP labels.
    #[arg(long, value_name = "PATH")]
    pub references: Option<PathBuf>,

    /// File with the per-residue secondary-structure labels of the target.
    #[arg(short = 'l', long, value_name = "PATH")]
    pub labels: Option<PathBuf>,

    /// Precomputed BLAST tabular hits keyed by fragment. Takes precedence over a BLAST database.
    #[arg(long, value_name = "PATH")]
    pub hits: Option<PathBuf>,

    /// BLAST database searched for every fragment when no precomputed hits are given.
    #[arg(long, value_name = "PATH")]
    pub blast_db: Option<PathBuf>,

    /// Override the `blastp` executable.
    #[arg(long, value_name = "PATH")]
    pub blast_executable: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.word-size=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn predict_parses_repeated_overrides() {
        let cli = Cli::try_parse_from([
            "cref", "-vv", "predict", "-i", "target.fasta", "-o", "out", "-k", "4", "-x",
            "1abc,2xyz", "-x", "3def", "-S", "search.word-size=3",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Predict(args) = cli.command;
        assert_eq!(args.input, PathBuf::from("target.fasta"));
        assert_eq!(args.clusters, Some(4));
        assert_eq!(args.exclude, vec!["1abc,2xyz", "3def"]);
        assert_eq!(args.set_values, vec!["search.word-size=3"]);
        assert!(args.config.is_none());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["cref", "-q", "-v", "predict", "-i", "a", "-o", "b"]);
        assert!(result.is_err());
    }
}
