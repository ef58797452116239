use serde::Serialize;
use std::path::Path;

use crate::config::TradingProfile;
use crate::telemetry::allocation::{AllocationEntry, allocation_snapshot};
use crate::telemetry::balance::{BalanceSummary, balance_summary};
use crate::telemetry::freshness::{FreshnessEntry, file_freshness};
use crate::telemetry::funding::{FundingSnapshot, funding_snapshot};
use crate::telemetry::market::{
    LiquidationSnapshot, OpenInterestSnapshot, SentimentSnapshot, liquidation_snapshot,
    open_interest_snapshot, sentiment_snapshot,
};

/// Body of `GET /api/dashboard-data`. Any section may be `null`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub config: TradingProfile,
    pub balance: Option<BalanceSummary>,
    pub sentiment: Option<SentimentSnapshot>,
    pub funding: Option<FundingSnapshot>,
    pub liquidations: Option<LiquidationSnapshot>,
    pub open_interest: Option<OpenInterestSnapshot>,
    pub allocations: Option<Vec<AllocationEntry>>,
    pub data_freshness: Vec<FreshnessEntry>,
    pub generated_at: String,
}

fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Re-read every source under `data_dir` and assemble one payload.
///
/// Blocking: performs synchronous file I/O.
pub fn build_dashboard_payload(data_dir: &Path, profile: &TradingProfile) -> DashboardPayload {
    DashboardPayload {
        config: profile.clone(),
        balance: balance_summary(data_dir),
        sentiment: sentiment_snapshot(data_dir),
        funding: funding_snapshot(data_dir),
        liquidations: liquidation_snapshot(data_dir),
        open_interest: open_interest_snapshot(data_dir),
        allocations: allocation_snapshot(data_dir),
        data_freshness: file_freshness(data_dir),
        generated_at: utc_now_iso(),
    }
}
