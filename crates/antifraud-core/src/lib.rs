//! antifraud-core: Shared types for the payment trust graph.
//!
//! This crate provides the foundational types used across the antifraud crates:
//! - `UserId`, the opaque node identifier of the trust graph
//! - `TrustLabel`, the per-feature classification written to the outputs
//! - `PaymentRecord` and its delimited-line parser
//! - Common error types

pub mod error;
pub mod types;

pub use error::RecordError;
pub use types::{PaymentRecord, TrustLabel, UserId};
