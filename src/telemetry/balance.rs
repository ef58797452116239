use serde::Serialize;
use std::path::Path;

use super::parse::{format_timestamp, parse_float, parse_timestamp};
use super::rows::{cell, read_all_rows};
use super::{BALANCE_FILE, or_absent};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub latest_balance: Option<f64>,
    pub latest_timestamp: Option<String>,
    pub change_from_previous: Option<f64>,
    pub hours_since_previous: Option<f64>,
}

/// Latest portfolio balance and its delta against the previous checkpoint.
///
/// Rows are ordered by parsed `timestamp`; rows whose timestamp does not
/// parse sort first, so they can only ever become "latest" when no row has a
/// valid timestamp.
pub fn balance_summary(data_dir: &Path) -> Option<BalanceSummary> {
    let path = data_dir.join(BALANCE_FILE);
    let mut rows = or_absent(&path, read_all_rows(&path));
    if rows.is_empty() {
        return None;
    }

    // Stable: rows with equal keys keep file order.
    rows.sort_by_key(|row| parse_timestamp(cell(row, "timestamp")));

    let latest = rows.last()?;
    let previous = rows.len().checked_sub(2).map(|i| &rows[i]);

    let latest_balance = parse_float(cell(latest, "balance"));
    let latest_ts = parse_timestamp(cell(latest, "timestamp"));

    let mut change_from_previous = None;
    let mut hours_since_previous = None;
    if let Some(prev) = previous {
        let prev_balance = parse_float(cell(prev, "balance"));
        let prev_ts = parse_timestamp(cell(prev, "timestamp"));

        if let (Some(now), Some(before)) = (latest_balance, prev_balance) {
            change_from_previous = Some(now - before);
        }
        if let (Some(now), Some(before)) = (latest_ts, prev_ts) {
            hours_since_previous = (now - before)
                .num_microseconds()
                .map(|us| us as f64 / 1_000_000.0 / 3600.0);
        }
    }

    Some(BalanceSummary {
        latest_balance,
        latest_timestamp: latest_ts.as_ref().map(format_timestamp),
        change_from_previous,
        hours_since_previous,
    })
}
