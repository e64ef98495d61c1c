//! Timed row counting over a single file.

use crate::{Error, ErrorKind, LineReader, Parser, Result};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

/// How the input is split into rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    /// Rows are CSV records; the secondary count is the number of fields.
    Csv,
    /// Rows are raw lines; the secondary count is the number of bytes.
    Raw,
}

impl ParseMode {
    /// Name of what the secondary count counts.
    pub fn unit(self) -> &'static str {
        match self {
            ParseMode::Csv => "cells",
            ParseMode::Raw => "bytes",
        }
    }
}

/// Running totals. Both only ever grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub lines: u64,
    pub secondary: u64,
}

impl Tally {
    #[inline]
    fn add_row(&mut self, amount: usize) {
        self.lines += 1;
        self.secondary += amount as u64;
    }
}

/// Counts CSV records and the fields across all of them.
pub fn count_csv<R: Read>(reader: R) -> Result<Tally> {
    let mut tally = Tally::default();
    for record in Parser::from_reader(reader).records() {
        tally.add_row(record?.len());
    }
    Ok(tally)
}

/// Counts lines and their length in bytes, terminators included.
pub fn count_raw<R: Read>(reader: R) -> Result<Tally> {
    let mut tally = Tally::default();
    let mut lines = LineReader::new(reader);
    while let Some(line) = lines.next() {
        let line = line.map_err(|e| Error::new(lines.line_count() + 1, ErrorKind::Io(e)))?;
        tally.add_row(line.len());
    }
    Ok(tally)
}

pub fn count<R: Read>(reader: R, mode: ParseMode) -> Result<Tally> {
    match mode {
        ParseMode::Csv => count_csv(reader),
        ParseMode::Raw => count_raw(reader),
    }
}

/// Outcome of one timed pass.
#[derive(Clone, Copy, Debug)]
pub struct Summary {
    pub mode: ParseMode,
    pub tally: Tally,
    pub elapsed: Duration,
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Read {} lines, {} {} in {:.6} s",
            self.tally.lines,
            self.tally.secondary,
            self.mode.unit(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Opens `path` and counts its rows, timing the open and the full pass.
///
/// The file is closed before this returns, on success or error.
pub fn time_file<P: AsRef<Path>>(path: P, mode: ParseMode) -> Result<Summary> {
    let path = path.as_ref();
    let start = Instant::now();
    let tally = {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), ?mode, "opened input");
        count(file, mode)?
    };
    let elapsed = start.elapsed();
    tracing::debug!(
        lines = tally.lines,
        secondary = tally.secondary,
        elapsed_us = elapsed.as_micros() as u64,
        "finished pass"
    );
    Ok(Summary {
        mode,
        tally,
        elapsed,
    })
}
