use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// ISO-8601 forms the agents write, with either `T` or a space between date
/// and time.
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Space separated fallback (`YYYY-MM-DD HH:MM:SS`) used by the balance writer.
const ALT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Best-effort timestamp parse. Offsets are folded into UTC so aware and
/// naive cells compare on the same axis.
pub fn parse_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw.filter(|s| !s.is_empty())?;

    for fmt in ISO_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    NaiveDateTime::parse_from_str(raw, ALT_FORMAT).ok()
}

/// Best-effort numeric parse. Non-finite values count as unparseable since
/// they have no JSON representation.
pub fn parse_float(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render as `YYYY-MM-DDTHH:MM:SS`, adding six fractional digits only when
/// the microsecond part is set.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
