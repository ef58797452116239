//! Snapshot extractors over the CSV files written by the trading agents.
//!
//! Every extractor is total: a missing, empty or unreadable file yields an
//! absent section, never an error.

pub mod allocation;
pub mod balance;
pub mod freshness;
pub mod funding;
pub mod market;
pub mod parse;
pub mod rows;

use std::path::Path;

use crate::error::HubError;

pub const BALANCE_FILE: &str = "portfolio_balance.csv";
pub const SENTIMENT_FILE: &str = "sentiment_history.csv";
pub const FUNDING_FILE: &str = "funding_history.csv";
pub const LIQUIDATION_FILE: &str = "liquidation_history.csv";
pub const OPEN_INTEREST_FILE: &str = "oi_history.csv";
pub const ALLOCATION_FILE: &str = "current_allocation.csv";

/// Collapse a read failure into the empty value, logging it once.
fn or_absent<T: Default>(path: &Path, result: Result<T, HubError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Cannot read {}: {e}", path.display());
        T::default()
    })
}
