use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mongo_log_csv::cli::Cli;
use mongo_log_csv::{write_csv, ErrorKind, LogParser, MongoLogError, OutputSink};

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let (mode, input) = cli.validate()?;
    info!("Parsing {} information from: {}", mode, input.display());

    let mut parser = LogParser::new().context("building builtin pattern registry")?;
    parser.parse_file(input, mode)?;
    write_csv(parser.records(), &OutputSink::Stdout)?;

    let records = parser.records();
    info!("Parsing complete");
    info!("Records processed: {}", records.len());
    if let Some(first) = records.first() {
        info!("First record preview:");
        for (key, value) in first.iter() {
            info!("  {}: {}", key, value);
        }
    }
    Ok(())
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<MongoLogError>() {
        Some(e) => match e.kind() {
            ErrorKind::InvalidMode => {
                error!("{}", e);
                eprintln!("Usage: mongo-log-csv <cluster|database> <INPUT_FILE>");
            }
            ErrorKind::NotFound => error!("Input file does not exist: {}", e),
            ErrorKind::IoFailure | ErrorKind::Configuration => {
                error!("Processing failed: {:#}", err)
            }
        },
        None => error!("Unexpected error: {:#}", err),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
