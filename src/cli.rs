//! CLI argument parsing for mongo-log-csv

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{MongoLogError, Result};
use crate::model::ParseMode;

#[derive(Parser, Debug)]
#[command(name = "mongo-log-csv")]
#[command(version)]
#[command(about = "Parse MongoDB cluster or database information from log files", long_about = None)]
#[command(after_help = "Output is written to stdout and can be redirected to a file")]
pub struct Cli {
    /// Type of parsing to perform: 'cluster' or 'database'
    #[arg(value_name = "PARSE_TYPE")]
    pub mode: String,

    /// Path to the input log file (.gz is decompressed)
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check the closed mode set and that the input is an existing regular file.
    pub fn validate(&self) -> Result<(ParseMode, &Path)> {
        let mode = self.mode.parse::<ParseMode>()?;
        if !self.input.is_file() {
            return Err(MongoLogError::NotFound {
                path: self.input.clone(),
            });
        }
        Ok((mode, self.input.as_path()))
    }
}
