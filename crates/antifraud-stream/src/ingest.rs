//! Batch phase: turn historical payments into graph edges.
//!
//! No searches run here. Every valid record adds (at most) one edge; malformed
//! lines are counted and skipped.

use std::io::BufRead;

use antifraud_core::{PaymentRecord, UserId};
use antifraud_graph::NeighborGraph;

use crate::error::Result;
use crate::progress::Progress;
use crate::types::IngestStats;

/// Read a batch file (header line first) into `graph`.
pub fn ingest_batch<R: BufRead>(
    reader: R,
    graph: &mut NeighborGraph<UserId>,
    progress: &mut Progress,
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        match PaymentRecord::parse_line(&line) {
            Ok(record) => {
                graph.add_edge(record.payer, record.payee);
                stats.records += 1;
            }
            Err(e) => {
                tracing::debug!(line = index + 1, error = %e, "Skipping malformed batch record");
                stats.skipped += 1;
            }
        }
        progress.tick();
    }

    progress.finish();
    Ok(stats)
}
