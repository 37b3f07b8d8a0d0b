use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileDataConfig, FileSearchConfig};
use super::models::{AppConfig, DataPaths, SearchSource};
use crate::cli::PredictArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use cref::core::models::search::{GapCosts, SearchParameters};
use cref::engine::config::PredictionConfigBuilder;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub fn build_config(args: &PredictArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let prediction_file = file_config.prediction.take().unwrap_or_default();
    let fragment_size = args
        .fragment_size
        .or(prediction_file.fragment_size)
        .unwrap_or(defaults.fragment_size);
    let number_of_clusters = args
        .clusters
        .or(prediction_file.number_of_clusters)
        .unwrap_or(defaults.number_of_clusters);
    let max_templates = args
        .max_templates
        .or(prediction_file.max_templates)
        .unwrap_or(defaults.max_templates);
    let identity_threshold = args
        .identity_threshold
        .or(prediction_file.identity_threshold)
        .unwrap_or(defaults.identity_threshold);

    let mut excluded = prediction_file.excluded_structures.unwrap_or_default();
    for value in &args.exclude {
        excluded.extend(
            parser::parse_structure_list(value).map_err(|e| CliError::Argument(e.to_string()))?,
        );
    }

    let search = merge_search(file_config.search.take().unwrap_or_default());
    let data = merge_data(args, file_config.data.take().unwrap_or_default(), &defaults)?;

    let mut builder = PredictionConfigBuilder::new()
        .fragment_size(fragment_size)
        .number_of_clusters(number_of_clusters)
        .max_templates(max_templates)
        .excluded_structures(excluded)
        .identity_threshold(identity_threshold)
        .search(search);
    if let Some(reference) = args
        .reference_structure
        .clone()
        .or(prediction_file.reference_structure)
    {
        builder = builder.reference_structure(reference);
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_dir: args.output.clone(),
        data,
        core_config,
    })
}

fn merge_search(file_val: FileSearchConfig) -> SearchParameters {
    let defaults = SearchParameters::default();
    SearchParameters {
        expect_threshold: file_val
            .expect_threshold
            .unwrap_or(defaults.expect_threshold),
        number_of_alignments: file_val
            .number_of_alignments
            .unwrap_or(defaults.number_of_alignments),
        word_size: file_val.word_size.unwrap_or(defaults.word_size),
        matrix: file_val.matrix.unwrap_or(defaults.matrix),
        gap_costs: file_val.gap_costs.unwrap_or(defaults.gap_costs),
    }
}

fn merge_data(
    args: &PredictArgs,
    file_val: FileDataConfig,
    defaults: &DefaultsConfig,
) -> Result<DataPaths> {
    let torsions_dir = require_existing(args.torsions.as_ref(), file_val.torsions, "torsions")?;
    let references = require_existing(
        args.references.as_ref(),
        file_val.references,
        "references",
    )?;
    let labels = require_existing(args.labels.as_ref(), file_val.labels, "labels")?;

    let hits = args.hits.clone().or(file_val.hits);
    let blast_db = args.blast_db.clone().or(file_val.blast_db);
    let search = match (hits, blast_db) {
        (Some(hits), _) => SearchSource::Precomputed(require_existing(None, Some(hits), "hits")?),
        // The database is a name prefix of several files, so it is not checked here.
        (None, Some(database)) => SearchSource::Blast {
            executable: args
                .blast_executable
                .clone()
                .or(file_val.blast_executable)
                .unwrap_or_else(|| defaults.blast_executable.clone()),
            database,
        },
        (None, None) => {
            return Err(CliError::Config(
                "A template source is required: set 'data.hits' or 'data.blast-db', or pass --hits or --blast-db.".to_string(),
            ));
        }
    };

    Ok(DataPaths {
        torsions_dir,
        references,
        labels,
        search,
    })
}

fn require_existing(
    cli_arg: Option<&PathBuf>,
    file_arg: Option<PathBuf>,
    kind: &str,
) -> Result<PathBuf> {
    let path = cli_arg.cloned().or(file_arg).ok_or_else(|| {
        CliError::Config(format!(
            "A value for 'data.{}' is required either in the config file or via --{}.",
            kind, kind
        ))
    })?;
    if !Path::new(&path).exists() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Provided path does not exist: {}", path.display()),
        )));
    }
    Ok(path)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "prediction.fragment-size" => {
                config
                    .prediction
                    .get_or_insert_with(Default::default)
                    .fragment_size = Some(parse_value(key, value_str, "integer")?);
            }
            "prediction.number-of-clusters" => {
                config
                    .prediction
                    .get_or_insert_with(Default::default)
                    .number_of_clusters = Some(parse_value(key, value_str, "integer")?);
            }
            "prediction.max-templates" => {
                config
                    .prediction
                    .get_or_insert_with(Default::default)
                    .max_templates = Some(parse_value(key, value_str, "integer")?);
            }
            "prediction.identity-threshold" => {
                config
                    .prediction
                    .get_or_insert_with(Default::default)
                    .identity_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "prediction.excluded-structures" => {
                config
                    .prediction
                    .get_or_insert_with(Default::default)
                    .excluded_structures = Some(
                    parser::parse_structure_list(value_str)
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "prediction.reference-structure" => {
                config
                    .prediction
                    .get_or_insert_with(Default::default)
                    .reference_structure = Some(value_str.trim().to_string());
            }
            "search.expect-threshold" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .expect_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "search.number-of-alignments" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .number_of_alignments = Some(parse_value(key, value_str, "integer")?);
            }
            "search.word-size" => {
                config.search.get_or_insert_with(Default::default).word_size =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "search.matrix" => {
                config.search.get_or_insert_with(Default::default).matrix =
                    Some(value_str.trim().to_string());
            }
            "search.gap-costs" => {
                let gap_costs = GapCosts::from_str(value_str)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                config.search.get_or_insert_with(Default::default).gap_costs = Some(gap_costs);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
