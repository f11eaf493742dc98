//! antifraud-stream: Payment classification over the trust graph.
//!
//! Builds the neighbor graph from a batch of historical payments, then walks
//! a stream of new payments in arrival order: each one is labelled per
//! feature by its social distance, written to that feature's output, and fed
//! back into the graph for the payments after it.

pub mod config;
pub mod detector;
pub mod error;
pub mod ingest;
pub mod output;
pub mod progress;
pub mod types;

pub use config::{DetectorConfig, FeatureRule, InsertionPolicy};
pub use detector::{Detector, InsertionRule, Verdict};
pub use error::DetectorError;
pub use types::{IngestStats, RunSummary, StreamStats};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::types::{FeatureSummary, GraphStats};

/// End-to-end runner: batch file in, one output file per feature out.
pub struct TrustPipeline {
    config: DetectorConfig,
    insertion_rule: Option<InsertionRule>,
}

impl TrustPipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: DetectorConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            insertion_rule: None,
        })
    }

    /// Override the configured insertion policy.
    pub fn with_insertion_rule(mut self, rule: InsertionRule) -> Self {
        self.insertion_rule = Some(rule);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run both phases.
    ///
    /// Orchestrates: count records → build graph from batch → classify stream
    /// into the output files → flush → summarize.
    pub fn run(
        &self,
        batch: &Path,
        stream: &Path,
        outputs: &[PathBuf],
    ) -> error::Result<RunSummary> {
        let start = std::time::Instant::now();

        let mut detector = Detector::new(&self.config)?;
        if let Some(rule) = &self.insertion_rule {
            detector = detector.with_insertion_rule(rule.clone());
        }
        if outputs.len() != detector.feature_count() {
            return Err(DetectorError::OutputMismatch {
                expected: detector.feature_count(),
                found: outputs.len(),
            });
        }

        let batch_total = non_empty_record_count(batch)?;
        let stream_total = non_empty_record_count(stream)?;

        let batch_reader = BufReader::new(File::open(batch)?);
        let batch_stats = detector.ingest_batch(batch_reader, batch_total)?;
        tracing::info!(
            records = batch_stats.records,
            skipped = batch_stats.skipped,
            nodes = detector.graph().node_count(),
            edges = detector.graph().edge_count(),
            "Payment graph built"
        );

        let stream_reader = BufReader::new(File::open(stream)?);
        let mut sinks = output::create_sinks(outputs)?;
        let stream_stats = detector.classify_stream(stream_reader, &mut sinks, stream_total)?;
        output::flush_all(&mut sinks)?;

        let computation_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            records = stream_stats.records,
            skipped = stream_stats.skipped,
            unlabelled = stream_stats.unlabelled,
            edges_added = stream_stats.edges_added,
            computation_ms,
            "Payment stream classified"
        );

        let labelled = stream_stats.labelled();
        let features = self
            .config
            .features
            .iter()
            .zip(&stream_stats.trusted)
            .map(|(rule, &trusted)| FeatureSummary {
                name: rule.name.clone(),
                cutoff: rule.cutoff,
                trusted,
                unverified: labelled - trusted,
            })
            .collect();

        Ok(RunSummary {
            batch: batch_stats,
            stream: stream_stats,
            features,
            graph_stats: GraphStats {
                total_nodes: detector.graph().node_count(),
                total_edges: detector.graph().edge_count(),
            },
            computation_ms,
            completed_at: Utc::now(),
        })
    }
}

/// Count the records of `path`, rejecting files with nothing after the header.
fn non_empty_record_count(path: &Path) -> error::Result<u64> {
    let total = progress::count_records(path)?;
    if total == 0 {
        return Err(DetectorError::EmptyInput {
            path: path.display().to_string(),
        });
    }
    Ok(total)
}
