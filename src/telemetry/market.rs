use serde::Serialize;
use std::path::Path;

use super::parse::parse_float;
use super::rows::{Row, cell, read_last_row};
use super::{LIQUIDATION_FILE, OPEN_INTEREST_FILE, SENTIMENT_FILE, or_absent};

// ── Types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSnapshot {
    pub timestamp: Option<String>,
    pub sentiment_score: Option<f64>,
    pub num_tweets: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquidationSnapshot {
    pub timestamp: Option<String>,
    pub long_size: Option<f64>,
    pub short_size: Option<f64>,
    pub total_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenInterestSnapshot {
    pub timestamp: Option<String>,
    pub btc_oi: Option<f64>,
    pub eth_oi: Option<f64>,
    pub total_oi: Option<f64>,
    pub btc_change_pct: Option<f64>,
    pub eth_change_pct: Option<f64>,
    pub total_change_pct: Option<f64>,
}

// ── Extractors ───────────────────────────────────────────────────────────

fn last_row(data_dir: &Path, file: &str) -> Option<Row> {
    let path = data_dir.join(file);
    or_absent(&path, read_last_row(&path))
}

fn text(row: &Row, key: &str) -> Option<String> {
    cell(row, key).map(str::to_string)
}

fn num(row: &Row, key: &str) -> Option<f64> {
    parse_float(cell(row, key))
}

pub fn sentiment_snapshot(data_dir: &Path) -> Option<SentimentSnapshot> {
    let row = last_row(data_dir, SENTIMENT_FILE)?;
    Some(SentimentSnapshot {
        timestamp: text(&row, "timestamp"),
        sentiment_score: num(&row, "sentiment_score"),
        num_tweets: num(&row, "num_tweets"),
    })
}

pub fn liquidation_snapshot(data_dir: &Path) -> Option<LiquidationSnapshot> {
    let row = last_row(data_dir, LIQUIDATION_FILE)?;
    Some(LiquidationSnapshot {
        timestamp: text(&row, "timestamp"),
        long_size: num(&row, "long_size"),
        short_size: num(&row, "short_size"),
        total_size: num(&row, "total_size"),
    })
}

pub fn open_interest_snapshot(data_dir: &Path) -> Option<OpenInterestSnapshot> {
    let row = last_row(data_dir, OPEN_INTEREST_FILE)?;
    Some(OpenInterestSnapshot {
        timestamp: text(&row, "timestamp"),
        btc_oi: num(&row, "btc_oi"),
        eth_oi: num(&row, "eth_oi"),
        total_oi: num(&row, "total_oi"),
        btc_change_pct: num(&row, "btc_change_pct"),
        eth_change_pct: num(&row, "eth_change_pct"),
        total_change_pct: num(&row, "total_change_pct"),
    })
}
