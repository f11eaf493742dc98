use thiserror::Error;

/// Reasons a payment line is rejected before it reaches the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Expected at least 4 comma-separated fields, found {found}")]
    MissingFields { found: usize },

    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("Record has an empty payer or payee id")]
    MissingParty,
}

impl RecordError {
    /// The line does not open with a timestamp, as with the continuation of
    /// a message that spans several lines.
    pub fn is_missing_timestamp(&self) -> bool {
        matches!(self, Self::InvalidTimestamp { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;
