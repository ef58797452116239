use serde::Serialize;
use std::path::Path;

use super::parse::parse_float;
use super::rows::{cell, read_all_rows};
use super::{ALLOCATION_FILE, or_absent};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEntry {
    pub token: Option<String>,
    pub allocation: Option<f64>,
    pub timestamp: Option<String>,
}

/// Current portfolio allocation, one entry per row in file order.
/// An empty list is reported as absent.
pub fn allocation_snapshot(data_dir: &Path) -> Option<Vec<AllocationEntry>> {
    let path = data_dir.join(ALLOCATION_FILE);
    let entries: Vec<AllocationEntry> = or_absent(&path, read_all_rows(&path))
        .iter()
        .map(|row| AllocationEntry {
            token: cell(row, "token").map(str::to_string),
            allocation: parse_float(cell(row, "allocation")),
            timestamp: cell(row, "timestamp").map(str::to_string),
        })
        .collect();

    if entries.is_empty() { None } else { Some(entries) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(allocation_snapshot(dir.path()), None);
    }

    #[test]
    fn zero_rows_is_absent_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ALLOCATION_FILE), "token,allocation,timestamp\n").unwrap();
        assert_eq!(allocation_snapshot(dir.path()), None);
    }

    #[test]
    fn rows_map_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ALLOCATION_FILE),
            "token,allocation,timestamp\nUSDC,20,2024-01-01\nSOL,abc,2024-01-01\nBONK,30\n",
        )
        .unwrap();

        let entries = allocation_snapshot(dir.path()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            AllocationEntry {
                token: Some("USDC".to_string()),
                allocation: Some(20.0),
                timestamp: Some("2024-01-01".to_string()),
            }
        );
        assert_eq!(entries[1].token.as_deref(), Some("SOL"));
        assert_eq!(entries[1].allocation, None);
        assert_eq!(entries[2].timestamp, None);
    }
}
