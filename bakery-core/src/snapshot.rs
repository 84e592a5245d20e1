//! Wire format of the persisted ticket.
//!
//! The stored value is a JSON array of `[name, line]` pairs in ticket order:
//!
//! ```json
//! [["Chapata", {"name":"Chapata","unitPrice":0.65,"quantity":2,"total":1.3,"glyph":"🥖"}]]
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TicketLine;

/// Reasons a stored ticket is rejected on load.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed ticket record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("entry key '{key}' does not match line name '{name}'")]
    KeyMismatch { key: String, name: String },

    #[error("duplicate line for '{0}'")]
    DuplicateLine(String),

    #[error("line '{0}' has quantity 0")]
    ZeroQuantity(String),

    #[error("line '{0}' has a non-positive unit price")]
    NonPositivePrice(String),
}

/// Serialize lines as ordered `[name, line]` pairs.
pub fn encode_lines(lines: &[TicketLine]) -> Result<String, serde_json::Error> {
    let pairs: Vec<(&str, &TicketLine)> = lines
        .iter()
        .map(|line| (line.name.as_str(), line))
        .collect();
    serde_json::to_string(&pairs)
}

/// Parse and validate a stored record, preserving order.
///
/// Stored `total` fields are returned as-is; callers recompute them.
pub fn decode_lines(raw: &str) -> Result<Vec<TicketLine>, SnapshotError> {
    let pairs: Vec<(String, TicketLine)> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(pairs.len());
    let mut lines = Vec::with_capacity(pairs.len());
    for (key, line) in pairs {
        if key != line.name {
            return Err(SnapshotError::KeyMismatch {
                key,
                name: line.name,
            });
        }
        if line.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(key));
        }
        if line.unit_price <= Decimal::ZERO {
            return Err(SnapshotError::NonPositivePrice(key));
        }
        if !seen.insert(key.clone()) {
            return Err(SnapshotError::DuplicateLine(key));
        }
        lines.push(line);
    }
    Ok(lines)
}
