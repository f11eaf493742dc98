//! Core domain types for the payment trust graph.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Result};

/// Timestamp layout of the first field of every payment line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Identifiers ───────────────────────────────────────────────────

/// Opaque identifier of a user taking part in payments.
///
/// Only equality and hashing are meaningful; ids are never ordered or
/// interpreted numerically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── Labels ────────────────────────────────────────────────────────

/// Classification of a payment for one feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrustLabel {
    Trusted,
    Unverified,
}

impl TrustLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Unverified => "unverified",
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted)
    }
}

impl fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ───────────────────────────────────────────────────────

/// One payment line: `time, id1, id2, amount, message`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub time: NaiveDateTime,
    pub payer: UserId,
    pub payee: UserId,
    /// `None` when the amount column does not hold a number.
    pub amount: Option<f64>,
    /// Free text; may itself contain commas.
    pub message: String,
}

impl PaymentRecord {
    /// Parse one delimited line.
    ///
    /// The timestamp is checked first, then the field count and both party
    /// ids. The amount is read leniently and everything after the fourth
    /// field is kept as the message.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();

        // A line that does not open with a timestamp is not a record at all,
        // however many commas it carries.
        let raw_time = fields[0].trim();
        let time = NaiveDateTime::parse_from_str(raw_time, TIMESTAMP_FORMAT).map_err(|_| {
            RecordError::InvalidTimestamp {
                value: raw_time.to_string(),
            }
        })?;

        if fields.len() < 4 {
            return Err(RecordError::MissingFields {
                found: fields.len(),
            });
        }

        let payer = fields[1].trim();
        let payee = fields[2].trim();
        if payer.is_empty() || payee.is_empty() {
            return Err(RecordError::MissingParty);
        }

        Ok(Self {
            time,
            payer: UserId::from(payer),
            payee: UserId::from(payee),
            amount: fields[3].trim().parse().ok(),
            message: fields[4..].join(",").trim().to_string(),
        })
    }

    /// The two parties as an unordered graph edge.
    pub fn parties(&self) -> (&UserId, &UserId) {
        (&self.payer, &self.payee)
    }
}

impl FromStr for PaymentRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_line(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let record =
            PaymentRecord::parse_line("2016-11-02 09:49:29, 52575, 1120, 25.32, Spam ").unwrap();

        assert_eq!(record.payer, UserId::from("52575"));
        assert_eq!(record.payee, UserId::from("1120"));
        assert_eq!(record.amount, Some(25.32));
        assert_eq!(record.message, "Spam");
        assert_eq!(record.time.to_string(), "2016-11-02 09:49:29");
    }

    #[test]
    fn test_parse_message_with_commas() {
        let record =
            PaymentRecord::parse_line("2016-11-02 09:49:29, 1, 2, 10.00, rent, utilities, food")
                .unwrap();
        assert_eq!(record.message, "rent, utilities, food");
    }

    #[test]
    fn test_parse_without_message() {
        let record = PaymentRecord::parse_line("2016-11-02 09:49:29, 1, 2, 10.00").unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_parse_lenient_amount() {
        let record = PaymentRecord::parse_line("2016-11-02 09:49:29, 1, 2, n/a, hi").unwrap();
        assert_eq!(record.amount, None);
    }

    #[test]
    fn test_parse_strips_crlf() {
        let record = PaymentRecord::parse_line("2016-11-02 09:49:29, 1, 2, 3.5\r\n").unwrap();
        assert_eq!(record.amount, Some(3.5));
    }

    #[test]
    fn test_reject_too_few_fields() {
        let err = PaymentRecord::parse_line("2016-11-02 09:49:29, 1, 2").unwrap_err();
        assert_eq!(err, RecordError::MissingFields { found: 3 });
    }

    #[test]
    fn test_reject_bad_timestamp() {
        let err = PaymentRecord::parse_line("a message continuation, 1, 2, 3").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp { .. }));

        let err = PaymentRecord::parse_line("2016/11/02 09:49:29, 1, 2, 3").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_continuation_line_is_a_timestamp_error() {
        // Second line of a message that itself contained a newline.
        let err = PaymentRecord::parse_line("see you tomorrow").unwrap_err();
        assert!(err.is_missing_timestamp());

        let err = PaymentRecord::parse_line("").unwrap_err();
        assert!(err.is_missing_timestamp());

        let err = PaymentRecord::parse_line("2016-11-02 09:49:29, 1").unwrap_err();
        assert!(!err.is_missing_timestamp());
    }

    #[test]
    fn test_reject_empty_party() {
        let err = PaymentRecord::parse_line("2016-11-02 09:49:29, , 2, 3").unwrap_err();
        assert_eq!(err, RecordError::MissingParty);
    }

    #[test]
    fn test_from_str() {
        let record: PaymentRecord = "2016-11-02 09:49:29, a, b, 1".parse().unwrap();
        assert_eq!(record.parties(), (&UserId::from("a"), &UserId::from("b")));
    }

    #[test]
    fn test_trust_label_display() {
        assert_eq!(TrustLabel::Trusted.to_string(), "trusted");
        assert_eq!(TrustLabel::Unverified.to_string(), "unverified");
        assert!(TrustLabel::Trusted.is_trusted());
        assert!(!TrustLabel::Unverified.is_trusted());
    }

    #[test]
    fn test_user_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::from("49466")).unwrap();
        assert_eq!(json, "\"49466\"");
        let label = serde_json::to_string(&TrustLabel::Unverified).unwrap();
        assert_eq!(label, "\"unverified\"");
    }
}
