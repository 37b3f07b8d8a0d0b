use crate::cli::PredictArgs;
use crate::config::builder::build_config;
use crate::config::models::{AppConfig, SearchSource};
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use cref::core::collaborators::HomologySearch;
use cref::core::io::blast::BlastSearch;
use cref::core::io::hits::HitTable;
use cref::core::io::labels::LabelFile;
use cref::core::io::references::ReferenceTable;
use cref::core::io::report;
use cref::core::io::torsions::TorsionDatabase;
use cref::core::models::sequence::Sequence;
use cref::engine::context::Collaborators;
use cref::engine::progress::ProgressReporter;
use cref::engine::state::JobState;
use cref::workflows::predict::{self, PredictionResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ANGLES_FILE: &str = "angles.csv";
pub const TEMPLATES_FILE: &str = "templates.csv";
pub const PARAMETERS_FILE: &str = "parameters.toml";
pub const SECONDARY_STRUCTURE_FILE: &str = "secondary_structure.txt";

pub fn run(args: PredictArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting torsion-angle prediction...");
    let result = execute(&config, &reporter)?;

    let resolved = result.resolved_count();
    if resolved == 0 {
        warn!("No residue received angles from a template.");
        println!("Warning: CReF++ finished but no residue received template angles.");
    }

    write_reports(&config, &result)?;
    println!(
        "✓ Angles for {}/{} residues written to: {}",
        resolved,
        result.sequence.len(),
        config.output_dir.join(ANGLES_FILE).display()
    );
    if let Some(deviations) = &result.deviations {
        println!(
            "  Compared {} residues with the experimental structure.",
            deviations.len()
        );
    }
    Ok(())
}

/// Loads the data sources named by `config` and runs one prediction job.
pub fn execute(config: &AppConfig, reporter: &ProgressReporter) -> Result<PredictionResult> {
    info!("Loading target sequence from {:?}", &config.input_path);
    let content = fs::read_to_string(&config.input_path)?;
    let residues =
        parser::parse_sequence_text(&content).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;
    let sequence = Sequence::new(&residues)?;

    info!("Loading reference chains from {:?}", &config.data.references);
    let references = ReferenceTable::load(&config.data.references)?;
    info!("Loaded {} reference chains.", references.len());
    let predictor = LabelFile::load(&config.data.labels)?;
    let torsions = TorsionDatabase::new(&config.data.torsions_dir);

    let search: Box<dyn HomologySearch> = match &config.data.search {
        SearchSource::Precomputed(path) => {
            let table = HitTable::load(path)?;
            info!(
                "Loaded precomputed hits for {} fragments.",
                table.fragment_count()
            );
            Box::new(table)
        }
        SearchSource::Blast {
            executable,
            database,
        } => Box::new(BlastSearch::new(executable, database)),
    };

    let collaborators = Collaborators::new(search.as_ref(), &predictor, &torsions, &references);
    let mut state = JobState::new();

    info!("Invoking the prediction workflow...");
    let result = predict::run(
        &sequence,
        collaborators,
        &config.core_config,
        &mut state,
        reporter,
    )?;
    info!(
        "Workflow finished: {} of {} residues resolved.",
        result.resolved_count(),
        result.sequence.len()
    );
    Ok(result)
}

/// Writes the angle table, template table, secondary structure and run parameters.
pub fn write_reports(config: &AppConfig, result: &PredictionResult) -> Result<()> {
    fs::create_dir_all(&config.output_dir)?;

    let path = output_path(&config.output_dir, ANGLES_FILE);
    info!("Writing angles to {:?}", &path);
    report::write_angles(
        BufWriter::new(File::create(&path)?),
        &result.sequence,
        &result.secondary_structure,
        &result.angles,
        &result.qualities,
    )?;

    let path = output_path(&config.output_dir, TEMPLATES_FILE);
    info!("Writing templates to {:?}", &path);
    report::write_templates(
        BufWriter::new(File::create(&path)?),
        result
            .fragments
            .iter()
            .map(|f| (f.offset + 1, f.candidates.as_slice())),
    )?;

    let path = output_path(&config.output_dir, SECONDARY_STRUCTURE_FILE);
    let mut writer = BufWriter::new(File::create(&path)?);
    writeln!(writer, "{}", result.sequence)?;
    writeln!(writer, "{}", result.secondary_structure)?;
    writer.flush()?;

    let path = output_path(&config.output_dir, PARAMETERS_FILE);
    report::write_parameters(BufWriter::new(File::create(&path)?), &config.core_config)?;
    Ok(())
}

fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::DataPaths;
    use cref::core::models::torsion::TorsionPair;
    use cref::engine::config::PredictionConfigBuilder;
    use tempfile::{TempDir, tempdir};

    const TORSIONS: &str = "\
residue,phi,psi
M,,150
K,-60,-45
V,-62.5,-41.25
L,-65,-40
A,-63,-42
G,-70,-35
H,-80,
";

    fn setup_job() -> (TempDir, AppConfig) {
        let dir = tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("torsions")).unwrap();
        fs::write(base.join("torsions/1abc.csv"), TORSIONS).unwrap();
        fs::write(
            base.join("references.csv"),
            "structure,chain,sequence,secondary_structure\n1ABC,A,MKVLAGH,CCHHHCC\n",
        )
        .unwrap();
        fs::write(base.join("target.ss"), "CCHHHCC\n").unwrap();
        fs::write(
            base.join("hits.tsv"),
            "# fragment hits\nMKVLA\t1abc_A\t1\t5\t1\t5\t5\t25\tMKVLA\n",
        )
        .unwrap();
        fs::write(base.join("target.fasta"), ">target\nMKVLAGH\n").unwrap();

        let config = AppConfig {
            input_path: base.join("target.fasta"),
            output_dir: base.join("out"),
            data: DataPaths {
                torsions_dir: base.join("torsions"),
                references: base.join("references.csv"),
                labels: base.join("target.ss"),
                search: SearchSource::Precomputed(base.join("hits.tsv")),
            },
            core_config: PredictionConfigBuilder::new().build().unwrap(),
        };
        (dir, config)
    }

    #[test]
    fn execute_predicts_from_file_backed_sources() {
        let (_dir, config) = setup_job();

        let result = execute(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.sequence, "MKVLAGH");
        assert_eq!(result.secondary_structure, "CCHHHCC");
        assert_eq!(result.angles.len(), 7);
        assert_eq!(result.angles[2], TorsionPair::new(-62.5, -41.25));
        assert_eq!(result.resolved_count(), 1);
        assert_eq!(result.fragments.len(), 3);
        assert_eq!(result.fragments[0].candidates.len(), 1);
        assert!(result.deviations.is_none());
    }

    #[test]
    fn write_reports_creates_all_files() {
        let (_dir, config) = setup_job();
        let result = execute(&config, &ProgressReporter::new()).unwrap();

        write_reports(&config, &result).unwrap();

        let angles = fs::read_to_string(config.output_dir.join(ANGLES_FILE)).unwrap();
        let lines: Vec<_> = angles.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("index,residue"));
        assert!(lines[3].starts_with("3,V,H,-62.5,-41.25"));

        let templates = fs::read_to_string(config.output_dir.join(TEMPLATES_FILE)).unwrap();
        assert_eq!(templates.lines().count(), 2);
        assert!(templates.lines().nth(1).unwrap().starts_with("1,1abc,A,MKVLA"));

        let ss = fs::read_to_string(config.output_dir.join(SECONDARY_STRUCTURE_FILE)).unwrap();
        assert_eq!(ss, "MKVLAGH\nCCHHHCC\n");

        let parameters = fs::read_to_string(config.output_dir.join(PARAMETERS_FILE)).unwrap();
        assert!(parameters.contains("fragment-size = 5"));
    }

    #[test]
    fn invalid_target_sequence_is_reported() {
        let (_dir, config) = setup_job();
        fs::write(&config.input_path, ">target\nMK1LA\n").unwrap();

        let result = execute(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(CliError::Sequence(_))));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let (_dir, config) = setup_job();
        fs::write(&config.input_path, ">target\n").unwrap();

        let result = execute(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn label_length_mismatch_is_an_engine_error() {
        let (_dir, config) = setup_job();
        fs::write(&config.data.labels, "CCHH\n").unwrap();

        let result = execute(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(CliError::Engine(_))));
    }
}
