//! CSV output for parsed records
//!
//! Header is the sorted union of every field name; absent fields become empty cells.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use csv::{Terminator, WriterBuilder};
use tracing::{info, warn};

use crate::error::{MongoLogError, Result};
use crate::model::Record;

/// Where the CSV goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    /// Created or truncated
    File(PathBuf),
}

/// Sorted union of field names across all records
pub fn header(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.field_names())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Serialize records into any writer, returning the number of data rows.
///
/// An empty slice writes nothing at all, not even a header.
pub fn write_records<W: Write>(records: &[Record], out: W) -> Result<usize> {
    if records.is_empty() {
        warn!("no data to write to CSV");
        return Ok(0);
    }

    let columns = header(records);
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(&columns)?;
    for record in records {
        wtr.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
    }
    wtr.flush()?;

    Ok(records.len())
}

/// Write to the given sink. A file handle lives only for the duration of this call.
pub fn write_csv(records: &[Record], sink: &OutputSink) -> Result<usize> {
    let written = match sink {
        OutputSink::Stdout => write_records(records, io::stdout().lock())?,
        OutputSink::File(path) => {
            if records.is_empty() {
                warn!(path = %path.display(), "no data, output file not created");
                return Ok(0);
            }
            let file = File::create(path).map_err(|source| MongoLogError::FileAccess {
                path: path.clone(),
                source,
            })?;
            write_records(records, file)?
        }
    };
    info!(records = written, "successfully wrote records");
    Ok(written)
}
