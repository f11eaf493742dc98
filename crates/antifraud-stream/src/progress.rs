//! Progress reporting for long batch and stream files.
//!
//! Emits a `tracing` event every `interval` records with the running
//! percentage, and one when the phase completes.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Record counter for one phase.
#[derive(Debug)]
pub struct Progress {
    phase: &'static str,
    total: u64,
    interval: u64,
    processed: u64,
}

impl Progress {
    pub fn new(phase: &'static str, total: u64, interval: u64) -> Self {
        Self {
            phase,
            total,
            interval: interval.max(1),
            processed: 0,
        }
    }

    /// Count one processed line.
    pub fn tick(&mut self) {
        self.processed += 1;
        if self.processed % self.interval == 0 {
            let percent = (self.percent() * 10.0).round() / 10.0;
            tracing::info!(
                phase = self.phase,
                processed = self.processed,
                total = self.total,
                percent,
                "Progress"
            );
        }
    }

    pub fn finish(&self) {
        tracing::info!(
            phase = self.phase,
            processed = self.processed,
            "Finished {} records",
            self.processed
        );
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Share of `total` processed so far, 100 when the total is unknown.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        100.0 * self.processed as f64 / self.total as f64
    }
}

/// Number of records in a delimited file: every line after the header.
pub fn count_records(path: &Path) -> io::Result<u64> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = 0u64;
    for line in reader.split(b'\n') {
        line?;
        lines += 1;
    }
    Ok(lines.saturating_sub(1))
}
