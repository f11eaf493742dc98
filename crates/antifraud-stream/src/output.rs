//! Per-feature output sinks: one label per line, one file per feature.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use antifraud_core::TrustLabel;

/// Create (truncating) one buffered writer per output path.
pub fn create_sinks(paths: &[PathBuf]) -> io::Result<Vec<BufWriter<File>>> {
    paths
        .iter()
        .map(|path| File::create(path).map(BufWriter::new))
        .collect()
}

/// Write `labels[i]` as one line to `sinks[i]`.
pub fn write_labels<W: Write>(sinks: &mut [W], labels: &[TrustLabel]) -> io::Result<()> {
    debug_assert_eq!(sinks.len(), labels.len());
    for (sink, label) in sinks.iter_mut().zip(labels) {
        writeln!(sink, "{label}")?;
    }
    Ok(())
}

pub fn flush_all<W: Write>(sinks: &mut [W]) -> io::Result<()> {
    sinks.iter_mut().try_for_each(Write::flush)
}
