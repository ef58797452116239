use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::{
    ALLOCATION_FILE, BALANCE_FILE, FUNDING_FILE, LIQUIDATION_FILE, OPEN_INTEREST_FILE,
    SENTIMENT_FILE,
};

/// Files whose presence and age the dashboard reports, in display order.
pub const TRACKED_FILES: [&str; 6] = [
    BALANCE_FILE,
    SENTIMENT_FILE,
    FUNDING_FILE,
    LIQUIDATION_FILE,
    OPEN_INTEREST_FILE,
    ALLOCATION_FILE,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreshnessEntry {
    pub name: String,
    pub exists: bool,
    pub last_updated: Option<String>,
}

fn modified_rfc3339(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let dt: DateTime<Utc> = modified.into();
    Some(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn file_freshness(data_dir: &Path) -> Vec<FreshnessEntry> {
    TRACKED_FILES
        .iter()
        .map(|name| {
            let path = data_dir.join(name);
            let exists = path.exists();
            FreshnessEntry {
                name: name.to_string(),
                exists,
                last_updated: if exists { modified_rfc3339(&path) } else { None },
            }
        })
        .collect()
}
