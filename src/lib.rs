//! Read-throughput benchmarks for CSV files.
//!
//! A file is read once, either as CSV records or as raw lines, while two
//! counters are kept: rows, and cells or bytes. The result is reported as
//! a single `Summary` line.

mod counter;
mod error;
mod lines;
mod parser;
mod records;

pub use counter::{count, count_csv, count_raw, time_file, ParseMode, Summary, Tally};
pub use error::{Error, ErrorKind, Result};
pub use lines::{LineChunks, LineReader, DEFAULT_CHUNK_SIZE};
pub use parser::{Parser, ParserBuilder};
pub use records::{Record, Records};

/// Sends warnings and errors to stderr so stdout carries only the summary.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

/// Times one pass over `path` and prints the summary to stdout.
pub fn report<P: AsRef<std::path::Path>>(path: P, mode: ParseMode) -> Result<()> {
    let summary = time_file(path, mode)?;
    println!("{}", summary);
    Ok(())
}
