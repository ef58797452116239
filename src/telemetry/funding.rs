use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::parse::parse_float;
use super::rows::{cell, read_last_row};
use super::{FUNDING_FILE, or_absent};

const FUNDING_RATE_SUFFIX: &str = "_funding_rate";
const ANNUAL_RATE_SUFFIX: &str = "_annual_rate";

/// Rates for one symbol.
///
/// Outer `None`: no column fed this field (omitted from JSON).
/// `Some(None)`: the column exists but its cell did not parse (JSON `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundingRates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_rate: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingSnapshot {
    pub timestamp: Option<String>,
    /// Symbol → rates, in the column order of the file.
    pub funding: IndexMap<String, FundingRates>,
}

pub fn funding_snapshot(data_dir: &Path) -> Option<FundingSnapshot> {
    let path = data_dir.join(FUNDING_FILE);
    let row = or_absent(&path, read_last_row(&path))?;

    let mut funding: IndexMap<String, FundingRates> = IndexMap::new();
    for (key, value) in &row {
        let value = parse_float(value.as_deref());
        if key.contains(FUNDING_RATE_SUFFIX) {
            let symbol = key.replace(FUNDING_RATE_SUFFIX, "");
            funding.entry(symbol).or_default().funding_rate = Some(value);
        } else if key.contains(ANNUAL_RATE_SUFFIX) {
            let symbol = key.replace(ANNUAL_RATE_SUFFIX, "");
            funding.entry(symbol).or_default().annual_rate = Some(value);
        }
    }

    let timestamp = cell(&row, "event_time")
        .filter(|s| !s.is_empty())
        .or_else(|| cell(&row, "timestamp"))
        .map(str::to_string);

    Some(FundingSnapshot { timestamp, funding })
}
