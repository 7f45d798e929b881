use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ORDER_PREFIX: &str = "MB-";

/// Display-only reference the customer quotes in their payment note. Nothing checks it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// Last six digits of the millisecond timestamp.
    pub fn from_millis(millis: i64) -> Self {
        let digits = millis.unsigned_abs().to_string();
        let tail = &digits[digits.len().saturating_sub(6)..];
        OrderId(format!("{}{}", ORDER_PREFIX, tail))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
