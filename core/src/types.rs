//! Wire DTOs for the Wowcher API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Vendor and
//! shipping method codes are kept as strings since the set is owned by the
//! remote service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A shipment update for one order, pushed through `Status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStatus {
    pub reference: String,
    pub timestamp: i64,
    pub status: i64,
    pub tracking_number: String,
    /// e.g. `ROYAL_MAIL`.
    pub shipping_vendor: String,
    /// e.g. `NEXT_DAY`.
    pub shipping_method: String,
}

/// The server's wrapping of an echoed payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EchoEnvelope {
    pub message: String,
    pub data: Value,
}
