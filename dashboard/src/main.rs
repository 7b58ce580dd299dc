use anyhow::Context;
use arrow::util::pretty::pretty_format_batches;
use clap::{value_parser, Arg, ArgMatches, Command};
use common::config::Settings;
use dashboard::reports::filters::{country_filter, parse_year};
use dashboard::reports::{ReportKind, Reports};
use serde::Serialize;
use std::process;

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Sets a custom config file")
}

fn report_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("name")
                .required(true)
                .value_name("REPORT")
                .help("global-revenue, customer-value-matrix, product-performance or service-quality"),
        )
        .arg(
            Arg::new("year")
                .long("year")
                .value_name("YYYY")
                .help("Restricts the report to one year"),
        )
        .arg(
            Arg::new("country")
                .long("country")
                .value_name("COUNTRY")
                .help("Restricts the report to one country"),
        )
        .arg(config_arg())
}

#[tokio::main]
async fn main() {
    let matches = Command::new("Dashboard Manager")
        .version("1.0")
        .about("Serves and prints the e-commerce analytics reports")
        .subcommand(
            Command::new("serve")
                .about("Run the dashboard API server")
                .arg(config_arg())
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(value_parser!(u16))
                        .help("Overrides the listen port"),
                ),
        )
        .subcommand(report_args(
            Command::new("report").about("Print one chart as JSON"),
        ))
        .subcommand(report_args(
            Command::new("query").about("Print the raw query result of one report"),
        ))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("serve", serve_matches)) => serve(serve_matches).await,
        Some(("report", report_matches)) => print_report(report_matches),
        Some(("query", query_matches)) => print_query(query_matches),
        _ => {
            eprintln!("Please specify a valid subcommand");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Dashboard error: {:#}", e);
        process::exit(1);
    }
}

fn load_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or("config/dashboard.toml");

    let settings = Settings::new(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path))?;
    common::logging::init_tracing(&settings.logging);
    Ok(settings)
}

async fn serve(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut settings = load_settings(matches)?;
    if let Some(port) = matches.get_one::<u16>("port") {
        settings.api.port = *port;
    }

    dashboard::run_dashboard_server(&settings)
        .await
        .context("Dashboard server failed")
}

struct Selection {
    kind: ReportKind,
    year: Option<i32>,
    country: Option<String>,
}

fn selection(matches: &ArgMatches) -> anyhow::Result<Selection> {
    let name = matches
        .get_one::<String>("name")
        .map(|s| s.as_str())
        .unwrap_or_default();

    Ok(Selection {
        kind: name.parse()?,
        year: parse_year(matches.get_one::<String>("year").map(|s| s.as_str()))?,
        country: country_filter(matches.get_one::<String>("country").map(|s| s.as_str())),
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = load_settings(matches)?;
    let Selection { kind, year, country } = selection(matches)?;
    let reports = Reports::from_settings(&settings);
    let country = country.as_deref();

    match kind {
        ReportKind::GlobalRevenue => print_json(&reports.global_revenue(year)),
        ReportKind::CustomerValueMatrix => print_json(&reports.customer_value_matrix(year, country)),
        ReportKind::ProductPerformance => print_json(&reports.product_performance(country)),
        ReportKind::ServiceQuality => print_json(&reports.service_quality(country)),
    }
}

fn print_query(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = load_settings(matches)?;
    let Selection { kind, year, country } = selection(matches)?;
    let reports = Reports::from_settings(&settings);

    let batch = reports
        .raw_result(kind, year, country.as_deref())
        .with_context(|| format!("Query {} failed", kind.query_name()))?;
    println!("{}", pretty_format_batches(&[batch])?);
    Ok(())
}
