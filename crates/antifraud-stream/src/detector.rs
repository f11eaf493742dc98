//! Stream phase: search, label, then feed the payment back into the graph.
//!
//! Each payment is classified against the graph as it stands after every
//! earlier batch and stream record, and only afterwards (and only if the
//! insertion rule accepts its distance) becomes an edge itself. Records are
//! therefore processed strictly in arrival order.

use std::io::{BufRead, Write};
use std::sync::Arc;

use antifraud_core::{PaymentRecord, TrustLabel, UserId};
use antifraud_graph::{labels_for, search, NeighborGraph};

use crate::config::DetectorConfig;
use crate::error::{DetectorError, Result};
use crate::ingest;
use crate::output;
use crate::progress::Progress;
use crate::types::{IngestStats, StreamStats};

/// Predicate over the search distance: `true` inserts the payment as an edge.
pub type InsertionRule = Arc<dyn Fn(u32) -> bool + Send + Sync>;

/// Classification of one stream payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Hops between the parties before this payment, or the sentinel.
    pub distance: u32,
    /// One label per feature.
    pub labels: Vec<TrustLabel>,
    /// Whether the payment created a new edge.
    pub edge_added: bool,
}

/// Sole owner of the neighbor graph for the lifetime of a run.
pub struct Detector {
    graph: NeighborGraph<UserId>,
    max_depth: u32,
    cutoffs: Vec<u32>,
    insert_when: InsertionRule,
    progress_interval: u64,
}

impl Detector {
    /// Create a detector with an empty graph.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        let policy = config.insertion;
        Ok(Self {
            graph: NeighborGraph::new(),
            max_depth: config.max_depth,
            cutoffs: config.cutoffs(),
            insert_when: Arc::new(move |distance| policy.should_insert(distance)),
            progress_interval: config.progress_interval,
        })
    }

    /// Start from an existing graph instead of an empty one.
    pub fn with_graph(mut self, graph: NeighborGraph<UserId>) -> Self {
        self.graph = graph;
        self
    }

    /// Replace the configured insertion policy with an arbitrary predicate.
    pub fn with_insertion_rule(mut self, rule: InsertionRule) -> Self {
        self.insert_when = rule;
        self
    }

    pub fn graph(&self) -> &NeighborGraph<UserId> {
        &self.graph
    }

    pub fn into_graph(self) -> NeighborGraph<UserId> {
        self.graph
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn feature_count(&self) -> usize {
        self.cutoffs.len()
    }

    /// Current distance between two users, without touching the graph.
    pub fn distance(&self, a: &UserId, b: &UserId) -> u32 {
        search::distance(&self.graph, a, b, self.max_depth)
    }

    /// Batch phase: add every valid record of `reader` as an edge.
    pub fn ingest_batch<R: BufRead>(&mut self, reader: R, total: u64) -> Result<IngestStats> {
        let mut progress = Progress::new("batch", total, self.progress_interval);
        tracing::info!(total, "Building payment graph");
        ingest::ingest_batch(reader, &mut self.graph, &mut progress)
    }

    /// Classify one payment, then apply the insertion rule to it.
    pub fn classify_payment(&mut self, record: &PaymentRecord) -> Verdict {
        let (payer, payee) = record.parties();
        let distance = search::distance(&self.graph, payer, payee, self.max_depth);
        let labels = labels_for(distance, &self.cutoffs);

        let edge_added =
            (self.insert_when)(distance) && self.graph.add_edge(payer.clone(), payee.clone());

        Verdict {
            distance,
            labels,
            edge_added,
        }
    }

    /// Stream phase: one line of labels per timestamped input line (header
    /// excluded) to each sink, in input order.
    ///
    /// Lines without a timestamp, such as the tail of a multi-line message,
    /// write nothing. Other malformed lines are labelled unverified for every
    /// feature. Neither touches the graph.
    pub fn classify_stream<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        sinks: &mut [W],
        total: u64,
    ) -> Result<StreamStats> {
        if sinks.len() != self.cutoffs.len() {
            return Err(DetectorError::OutputMismatch {
                expected: self.cutoffs.len(),
                found: sinks.len(),
            });
        }

        let mut progress = Progress::new("stream", total, self.progress_interval);
        let mut stats = StreamStats::with_features(self.cutoffs.len());
        let unverified = vec![TrustLabel::Unverified; self.cutoffs.len()];
        tracing::info!(total, "Analyzing payment stream");

        for (index, line) in reader.lines().enumerate().skip(1) {
            let line = line?;
            match PaymentRecord::parse_line(&line) {
                Ok(record) => {
                    let verdict = self.classify_payment(&record);
                    output::write_labels(sinks, &verdict.labels)?;
                    stats.count_labels(&verdict.labels);
                    stats.records += 1;
                    if verdict.edge_added {
                        stats.edges_added += 1;
                    }
                }
                Err(e) if e.is_missing_timestamp() => {
                    tracing::debug!(
                        line = index + 1,
                        error = %e,
                        "Stream line without timestamp skipped"
                    );
                    stats.skipped += 1;
                    stats.unlabelled += 1;
                }
                Err(e) => {
                    tracing::debug!(
                        line = index + 1,
                        error = %e,
                        "Malformed stream record labelled unverified"
                    );
                    output::write_labels(sinks, &unverified)?;
                    stats.skipped += 1;
                }
            }
            progress.tick();
        }

        progress.finish();
        Ok(stats)
    }
}
