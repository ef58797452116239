use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HubError;

/// Hub configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub bind: String,
    pub port: u16,

    /// Directory holding the telemetry CSV files written by the trading agents.
    pub data_dir: PathBuf,

    /// Optional YAML trading profile. Unset ⇒ profile comes from `DASH_*` vars.
    pub profile_path: Option<PathBuf>,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(default)
}

/// Comma separated list; blank entries are dropped.
fn env_list(name: &str, default: &[&str]) -> Vec<String> {
    match env::var(name) {
        Ok(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

fn env_path(name: &str, default: &str) -> PathBuf {
    PathBuf::from(env_str(name, default))
}

impl HubConfig {
    pub fn from_env() -> Self {
        let profile_path = env::var("DASH_PROFILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            bind: env_str("DASH_BIND", "0.0.0.0"),
            port: env_u16("DASH_PORT", 8000),
            data_dir: env_path("DASH_DATA_DIR", "src/data"),
            profile_path,
        }
    }
}

// ── Trading profile ──────────────────────────────────────────────────────

/// Exchange, risk rails and trading parameters of the agents being monitored.
///
/// Built once at startup and reported verbatim as the `config` section of
/// every payload. Serialises to the same shape it deserialises from, so a
/// YAML profile mirrors the JSON the dashboard receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingProfile {
    pub exchange: String,
    pub risk: RiskLimits,
    pub trading: TradingParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    pub cash_buffer_pct: f64,
    pub max_position_pct: f64,
    pub max_loss_usd: f64,
    pub max_gain_usd: f64,
    pub min_balance_usd: f64,
    pub use_percentage_limits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingParams {
    pub use_swarm_mode: bool,
    pub long_only: bool,
    pub leverage: f64,
    pub symbols: Vec<String>,
    pub monitored_tokens: Vec<String>,
    pub sleep_between_runs_minutes: u32,
    pub data_timeframe: String,
    pub days_of_history: u32,
}

impl Default for TradingProfile {
    fn default() -> Self {
        Self {
            exchange: "solana".to_string(),
            risk: RiskLimits::default(),
            trading: TradingParams::default(),
        }
    }
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            cash_buffer_pct: 20.0,
            max_position_pct: 30.0,
            max_loss_usd: 25.0,
            max_gain_usd: 25.0,
            min_balance_usd: 50.0,
            use_percentage_limits: false,
        }
    }
}

impl Default for TradingParams {
    fn default() -> Self {
        Self {
            use_swarm_mode: false,
            long_only: true,
            leverage: 9.0,
            symbols: vec!["BTC".to_string(), "ETH".to_string(), "SOL".to_string()],
            monitored_tokens: Vec::new(),
            sleep_between_runs_minutes: 15,
            data_timeframe: "15m".to_string(),
            days_of_history: 3,
        }
    }
}

impl TradingProfile {
    /// Resolve the profile for this process: the YAML file when one is
    /// configured, otherwise `DASH_*` environment variables over defaults.
    pub fn load(cfg: &HubConfig) -> Result<Self, HubError> {
        match &cfg.profile_path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::from_env()),
        }
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, HubError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| HubError::Config(format!("cannot read profile {}: {e}", path.display())))?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, HubError> {
        // An empty document deserialises to unit, not to an all-default struct.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_env() -> Self {
        let risk = RiskLimits::default();
        let trading = TradingParams::default();
        let default_symbols: Vec<&str> = trading.symbols.iter().map(String::as_str).collect();

        Self {
            exchange: env_str("DASH_EXCHANGE", "solana"),
            risk: RiskLimits {
                cash_buffer_pct: env_f64("DASH_CASH_PERCENTAGE", risk.cash_buffer_pct),
                max_position_pct: env_f64("DASH_MAX_POSITION_PERCENTAGE", risk.max_position_pct),
                max_loss_usd: env_f64("DASH_MAX_LOSS_USD", risk.max_loss_usd),
                max_gain_usd: env_f64("DASH_MAX_GAIN_USD", risk.max_gain_usd),
                min_balance_usd: env_f64("DASH_MINIMUM_BALANCE_USD", risk.min_balance_usd),
                use_percentage_limits: env_bool("DASH_USE_PERCENTAGE", risk.use_percentage_limits),
            },
            trading: TradingParams {
                use_swarm_mode: env_bool("DASH_USE_SWARM_MODE", trading.use_swarm_mode),
                long_only: env_bool("DASH_LONG_ONLY", trading.long_only),
                leverage: env_f64("DASH_LEVERAGE", trading.leverage),
                symbols: env_list("DASH_SYMBOLS", &default_symbols),
                monitored_tokens: env_list("DASH_MONITORED_TOKENS", &[]),
                sleep_between_runs_minutes: env_u32(
                    "DASH_SLEEP_BETWEEN_RUNS_MINUTES",
                    trading.sleep_between_runs_minutes,
                ),
                data_timeframe: env_str("DASH_DATA_TIMEFRAME", &trading.data_timeframe),
                days_of_history: env_u32("DASH_DAYSBACK", trading.days_of_history),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_env(key: &str, val: &str) -> Option<String> {
        let prev = env::var(key).ok();
        unsafe {
            env::set_var(key, val);
        }
        prev
    }

    fn restore_env(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => unsafe {
                env::set_var(key, v);
            },
            None => unsafe {
                env::remove_var(key);
            },
        }
    }

    #[test]
    fn hub_config_reads_env_overrides() {
        let _g = ENV_LOCK.lock().unwrap();
        let p_port = set_env("DASH_PORT", "9123");
        let p_dir = set_env("DASH_DATA_DIR", " /var/lib/agents ");
        let p_prof = set_env("DASH_PROFILE", "");

        let cfg = HubConfig::from_env();
        assert_eq!(cfg.port, 9123);
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/agents"));
        assert_eq!(cfg.profile_path, None);

        restore_env("DASH_PORT", p_port);
        restore_env("DASH_DATA_DIR", p_dir);
        restore_env("DASH_PROFILE", p_prof);
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let _g = ENV_LOCK.lock().unwrap();
        let prev = set_env("DASH_PORT", "not-a-port");
        assert_eq!(HubConfig::from_env().port, 8000);
        restore_env("DASH_PORT", prev);
    }

    #[test]
    fn profile_from_env_parses_lists_and_flags() {
        let _g = ENV_LOCK.lock().unwrap();
        let p_sym = set_env("DASH_SYMBOLS", "BTC, ,WIF");
        let p_swarm = set_env("DASH_USE_SWARM_MODE", "yes");
        let p_lev = set_env("DASH_LEVERAGE", "3.5");

        let profile = TradingProfile::from_env();
        assert_eq!(profile.trading.symbols, vec!["BTC".to_string(), "WIF".to_string()]);
        assert!(profile.trading.use_swarm_mode);
        assert_eq!(profile.trading.leverage, 3.5);

        restore_env("DASH_SYMBOLS", p_sym);
        restore_env("DASH_USE_SWARM_MODE", p_swarm);
        restore_env("DASH_LEVERAGE", p_lev);
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_fields() {
        let yaml = "exchange: hyperliquid\nrisk:\n  max_loss_usd: 100\ntrading:\n  symbols: [SOL]\n";
        let profile = TradingProfile::from_yaml_str(yaml).unwrap();
        assert_eq!(profile.exchange, "hyperliquid");
        assert_eq!(profile.risk.max_loss_usd, 100.0);
        assert_eq!(profile.risk.cash_buffer_pct, RiskLimits::default().cash_buffer_pct);
        assert_eq!(profile.trading.symbols, vec!["SOL".to_string()]);
        assert_eq!(profile.trading.data_timeframe, "15m");
    }

    #[test]
    fn empty_yaml_is_default_profile() {
        assert_eq!(TradingProfile::from_yaml_str("  \n").unwrap(), TradingProfile::default());
    }

    #[test]
    fn missing_yaml_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TradingProfile::from_yaml_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, HubError::Config(_)));
    }

    #[test]
    fn profile_serialises_to_dashboard_shape() {
        let v = serde_json::to_value(TradingProfile::default()).unwrap();
        assert_eq!(v["exchange"], "solana");
        assert_eq!(v["risk"]["use_percentage_limits"], false);
        assert_eq!(v["trading"]["days_of_history"], 3);
        assert!(v["trading"]["monitored_tokens"].as_array().unwrap().is_empty());
    }
}
