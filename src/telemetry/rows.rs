use indexmap::IndexMap;
use std::fs::File;
use std::path::Path;

use crate::error::HubError;

/// One CSV record keyed by header name, in column order.
///
/// Every header key is present. Records shorter than the header map their
/// trailing keys to `None` rather than an empty cell.
pub type Row = IndexMap<String, Option<String>>;

/// Cell lookup that treats a missing column or a missing cell as absent.
pub fn cell<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(|v| v.as_deref())
}

fn open_reader(path: &Path) -> Result<Option<csv::Reader<File>>, HubError> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path)?;
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    Ok(Some(reader))
}

fn to_row(headers: &csv::StringRecord, record: &csv::StringRecord) -> Row {
    headers
        .iter()
        .enumerate()
        .map(|(i, k)| (k.to_string(), record.get(i).map(str::to_string)))
        .collect()
}

/// Return the final record of a CSV file, keeping one record in memory.
pub fn read_last_row(path: &Path) -> Result<Option<Row>, HubError> {
    let Some(mut reader) = open_reader(path)? else {
        return Ok(None);
    };
    let headers = reader.headers()?.clone();

    let mut record = csv::StringRecord::new();
    let mut last: Option<Row> = None;
    while reader.read_record(&mut record)? {
        last = Some(to_row(&headers, &record));
    }
    Ok(last)
}

/// Return every record of a CSV file in file order.
pub fn read_all_rows(path: &Path) -> Result<Vec<Row>, HubError> {
    let Some(mut reader) = open_reader(path)? else {
        return Ok(Vec::new());
    };
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_row(&headers, &record?));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert_eq!(read_last_row(&path).unwrap(), None);
        assert!(read_all_rows(&path).unwrap().is_empty());
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.csv");
        fs::write(&path, "timestamp,balance\n").unwrap();
        assert_eq!(read_last_row(&path).unwrap(), None);
        assert!(read_all_rows(&path).unwrap().is_empty());
    }

    #[test]
    fn empty_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.csv");
        fs::write(&path, "").unwrap();
        assert_eq!(read_last_row(&path).unwrap(), None);
    }

    #[test]
    fn last_row_wins_and_keeps_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.csv");
        fs::write(&path, "timestamp,score\n2024-01-01,1\n\n2024-01-02,\"2,5\"\n").unwrap();

        let row = read_last_row(&path).unwrap().unwrap();
        assert_eq!(cell(&row, "timestamp"), Some("2024-01-02"));
        assert_eq!(cell(&row, "score"), Some("2,5"));
        assert_eq!(cell(&row, "missing"), None);
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["timestamp", "score"]);
    }

    #[test]
    fn all_rows_in_file_order_with_short_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "token,allocation,timestamp\nSOL,40,t1\nBONK,60\n").unwrap();

        let rows = read_all_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(cell(&rows[0], "token"), Some("SOL"));
        assert_eq!(cell(&rows[1], "token"), Some("BONK"));
        assert_eq!(cell(&rows[1], "timestamp"), None);
    }

    #[test]
    fn short_record_keeps_every_header_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.csv");
        fs::write(&path, "timestamp,BTC_funding_rate,ETH_funding_rate\nt,0.01\n").unwrap();

        let row = read_last_row(&path).unwrap().unwrap();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["timestamp", "BTC_funding_rate", "ETH_funding_rate"]);
        assert_eq!(row["BTC_funding_rate"].as_deref(), Some("0.01"));
        assert_eq!(row["ETH_funding_rate"], None);
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, b"timestamp,balance\n2024-01-01,\xff\xfe\n").unwrap();
        assert!(matches!(read_all_rows(&path), Err(HubError::Csv(_))));
    }
}
