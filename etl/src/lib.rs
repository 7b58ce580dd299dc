pub mod extract;
pub mod load;
pub mod models;
pub mod normalize;
pub mod synthetic;
pub mod utils;

use common::config::Settings;
use common::Result;
use normalize::ConflictReport;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// Outcome of one ETL run.
#[derive(Debug, Serialize)]
pub struct EtlReport {
    pub input: PathBuf,
    pub database: PathBuf,
    pub source_rows: usize,
    pub skipped_rows: usize,
    pub synthesized_delivery_dates: usize,
    pub tables: BTreeMap<&'static str, usize>,
    pub conflicts: ConflictReport,
}

/// Runs extract, synthesis, normalization and load against the configured
/// input file and store. Nothing is written unless every earlier step succeeds.
pub fn run_etl_pipeline(settings: &Settings) -> Result<EtlReport> {
    let input = &settings.etl.input_path;
    let database = &settings.database.path;
    info!(input = %input.display(), database = %database.display(), "Starting ETL run");

    let mut extract = extract::read_order_lines(input, settings.etl.on_parse_error)?;
    let synthesized = synthetic::synthesize_delivery_dates(&mut extract.lines, settings.etl.seed);
    let tables = normalize::normalize(&extract.lines)?;

    let mut conn = load::open_store(database)?;
    let counts = load::write_tables(&mut conn, &tables)?;

    let report = EtlReport {
        input: input.clone(),
        database: database.clone(),
        source_rows: extract.lines.len(),
        skipped_rows: extract.skipped_rows,
        synthesized_delivery_dates: synthesized,
        tables: counts,
        conflicts: tables.conflicts,
    };

    info!(
        rows = report.source_rows,
        skipped = report.skipped_rows,
        conflicts = report.conflicts.total(),
        "ETL run complete"
    );
    Ok(report)
}

/// Loads settings from `config_path` and runs the pipeline.
pub fn run_etl_pipeline_from_config(config_path: &str) -> Result<EtlReport> {
    let settings = Settings::new(config_path)?;
    run_etl_pipeline(&settings)
}
