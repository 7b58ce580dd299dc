use anyhow::Context;
use clap::{value_parser, Arg, ArgMatches, Command};
use common::config::Settings;
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = Command::new("ETL Pipeline Manager")
        .version("1.0")
        .about("Normalizes the flat e-commerce export into the dashboard store")
        .subcommand(
            Command::new("etl")
                .about("Run the ETL pipeline")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("Sets a custom config file"),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("CSV")
                        .value_parser(value_parser!(PathBuf))
                        .help("Overrides the input extract"),
                )
                .arg(
                    Arg::new("database")
                        .short('d')
                        .long("database")
                        .value_name("DB")
                        .value_parser(value_parser!(PathBuf))
                        .help("Overrides the store file"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("N")
                        .value_parser(value_parser!(u64))
                        .help("Overrides the delivery date seed"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("etl", etl_matches)) => {
            if let Err(e) = run_etl(etl_matches) {
                eprintln!("ETL pipeline error: {:#}", e);
                process::exit(1);
            }
        }

        _ => {
            eprintln!("Please specify a valid subcommand");
            process::exit(1);
        }
    }
}

fn run_etl(matches: &ArgMatches) -> anyhow::Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or("config/dashboard.toml");

    let mut settings = Settings::new(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path))?;
    common::logging::init_tracing(&settings.logging);

    if let Some(input) = matches.get_one::<PathBuf>("input") {
        settings.etl.input_path = input.clone();
    }
    if let Some(database) = matches.get_one::<PathBuf>("database") {
        settings.database.path = database.clone();
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        settings.etl.seed = *seed;
    }

    let report = etl::run_etl_pipeline(&settings).context("ETL run failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
