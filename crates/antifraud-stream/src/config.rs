//! Configuration for the payment classifier.

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, Result};

/// Top-level detector configuration.
///
/// Loaded from the `antifraud.toml` `[detector]` section or
/// `ANTIFRAUD__DETECTOR__*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Deepest search round before giving up (default: 4).
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// One feature per output file, cutoffs in ascending order.
    #[serde(default = "default_features")]
    pub features: Vec<FeatureRule>,

    /// When a classified stream payment is added to the graph.
    #[serde(default)]
    pub insertion: InsertionPolicy,

    /// Records between two progress events.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

/// A named cutoff: a payment is trusted for this feature iff its distance is
/// strictly below `cutoff`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureRule {
    pub name: String,
    pub cutoff: u32,
}

impl FeatureRule {
    pub fn new(name: &str, cutoff: u32) -> Self {
        Self {
            name: name.to_string(),
            cutoff,
        }
    }
}

/// Predicate over the search distance deciding whether a stream payment
/// becomes a new edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum InsertionPolicy {
    /// Insert every valid payment.
    Always,
    /// Freeze the graph after the batch phase.
    Never,
    /// Insert only when the parties were more than `hops` apart.
    FartherThan { hops: u32 },
}

impl Default for InsertionPolicy {
    fn default() -> Self {
        Self::FartherThan { hops: 1 }
    }
}

impl InsertionPolicy {
    pub fn should_insert(&self, distance: u32) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::FartherThan { hops } => distance > *hops,
        }
    }
}

fn default_max_depth() -> u32 {
    4
}

fn default_features() -> Vec<FeatureRule> {
    vec![
        FeatureRule::new("feature1", 2),
        FeatureRule::new("feature2", 3),
        FeatureRule::new("feature3", 5),
    ]
}

fn default_progress_interval() -> u64 {
    100_000
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            features: default_features(),
            insertion: InsertionPolicy::default(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl DetectorConfig {
    /// Load from `<file_prefix>.{toml,json,yaml,...}` (optional) layered under
    /// `ANTIFRAUD__` environment variables. A missing `[detector]` section
    /// yields the defaults.
    ///
    /// The result is not validated: callers apply their overrides first and
    /// validation happens when a `Detector` or `TrustPipeline` is built.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("ANTIFRAUD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match cfg.get::<DetectorConfig>("detector") {
            Ok(c) => Ok(c),
            Err(config::ConfigError::NotFound(_)) => Ok(DetectorConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reject settings under which the labels would be meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(invalid("max_depth must be at least 1"));
        }
        if self.features.is_empty() {
            return Err(invalid("at least one feature is required"));
        }
        if self.progress_interval == 0 {
            return Err(invalid("progress_interval must be at least 1"));
        }
        if self
            .features
            .windows(2)
            .any(|pair| pair[0].cutoff > pair[1].cutoff)
        {
            return Err(invalid("feature cutoffs must be in ascending order"));
        }

        let sentinel = antifraud_graph::sentinel(self.max_depth);
        if let Some(rule) = self.features.iter().find(|f| f.cutoff > sentinel) {
            return Err(DetectorError::InvalidConfig(format!(
                "feature {} cutoff {} exceeds max_depth + 1 ({sentinel}); unreachable pairs would be trusted",
                rule.name, rule.cutoff
            )));
        }
        Ok(())
    }

    /// Feature cutoffs in configuration order.
    pub fn cutoffs(&self) -> Vec<u32> {
        self.features.iter().map(|f| f.cutoff).collect()
    }
}

fn invalid(msg: &str) -> DetectorError {
    DetectorError::InvalidConfig(msg.to_string())
}
