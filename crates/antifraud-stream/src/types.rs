//! Result types for the batch and stream phases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use antifraud_core::TrustLabel;

/// Outcome of the batch phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestStats {
    /// Valid records turned into edges.
    pub records: u64,
    /// Malformed lines that were skipped.
    pub skipped: u64,
}

/// Outcome of the stream phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamStats {
    /// Valid records that were searched and labelled.
    pub records: u64,
    /// Lines that were not classified.
    pub skipped: u64,
    /// Skipped lines without a timestamp, for which nothing was written.
    pub unlabelled: u64,
    /// New edges inserted by the feedback step.
    pub edges_added: u64,
    /// Trusted count per feature, in feature order.
    pub trusted: Vec<u64>,
}

impl StreamStats {
    pub fn with_features(count: usize) -> Self {
        Self {
            trusted: vec![0; count],
            ..Default::default()
        }
    }

    /// Lines written to each output.
    pub fn labelled(&self) -> u64 {
        self.records + self.skipped - self.unlabelled
    }

    /// Tally one written line of labels.
    pub fn count_labels(&mut self, labels: &[TrustLabel]) {
        for (tally, label) in self.trusted.iter_mut().zip(labels) {
            if label.is_trusted() {
                *tally += 1;
            }
        }
    }
}

/// Per-feature totals for the run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub name: String,
    pub cutoff: u32,
    pub trusted: u64,
    pub unverified: u64,
}

/// Statistics about the neighbor graph at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// Complete result of a batch + stream run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub batch: IngestStats,
    pub stream: StreamStats,
    pub features: Vec<FeatureSummary>,
    pub graph_stats: GraphStats,
    pub computation_ms: u64,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_labels() {
        let mut stats = StreamStats::with_features(3);
        stats.count_labels(&[
            TrustLabel::Trusted,
            TrustLabel::Unverified,
            TrustLabel::Trusted,
        ]);
        stats.count_labels(&[TrustLabel::Unverified; 3]);
        stats.count_labels(&[TrustLabel::Trusted; 3]);

        assert_eq!(stats.trusted, vec![2, 1, 2]);
    }

    #[test]
    fn test_labelled_excludes_unlabelled_lines() {
        let stats = StreamStats {
            records: 5,
            skipped: 3,
            unlabelled: 2,
            ..StreamStats::with_features(3)
        };
        assert_eq!(stats.labelled(), 6);
    }
}
