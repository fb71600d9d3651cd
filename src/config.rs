use std::env;
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::dashboard::controller::DEMO_ADDRESS;
use crate::models::{NetworkSet, WalletAddress};
use crate::providers::http_provider::DEFAULT_API_URL;
use crate::traits::data_provider::FeePeriod;

pub const DEFAULT_STORE_PATH: &str = ".wallet-dashboard.json";
pub const DEFAULT_OUTPUT_PATH: &str = "dashboard.html";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub networks: NetworkSet,
    /// Page URL whose `address` parameter takes part in address resolution
    pub page_url: Option<String>,
    pub manual_address: Option<String>,
    /// Account exposed by the local wallet provider
    pub wallet_account: Option<String>,
    pub demo_address: Option<WalletAddress>,
    pub store_path: PathBuf,
    pub output_path: PathBuf,
    pub fee_period: Option<FeePeriod>,
    pub connect_wallet: bool,
    pub log_level: LevelFilter,
    /// Problems found while reading, for logging once the subscriber is up
    pub warnings: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            networks: NetworkSet::default(),
            page_url: None,
            manual_address: None,
            wallet_account: None,
            demo_address: WalletAddress::parse(DEMO_ADDRESS).ok(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fee_period: None,
            connect_wallet: false,
            log_level: LevelFilter::INFO,
            warnings: Vec::new(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mut warnings = Vec::new();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let demo_address = match lookup("DEMO_ADDRESS").map(|v| v.trim().to_string()) {
            None => defaults.demo_address,
            Some(v) if v.is_empty() => None,
            Some(v) => match WalletAddress::parse(&v) {
                Ok(address) => Some(address),
                Err(_) => {
                    warnings.push(format!("Ignoring invalid DEMO_ADDRESS: {}", v));
                    defaults.demo_address
                }
            },
        };

        let fee_period = non_empty("FEE_PERIOD").and_then(|v| match v.parse::<FeePeriod>() {
            Ok(period) => Some(period),
            Err(e) => {
                warnings.push(e);
                None
            }
        });

        let log_level = non_empty("LOG_LEVEL")
            .and_then(|v| match v.parse::<LevelFilter>() {
                Ok(level) => Some(level),
                Err(_) => {
                    warnings.push(format!("Unknown LOG_LEVEL {}, using info", v));
                    None
                }
            })
            .unwrap_or(defaults.log_level);

        Self {
            api_url: non_empty("DASHBOARD_API_URL").unwrap_or(defaults.api_url),
            networks: non_empty("DASHBOARD_NETWORKS")
                .map(|v| NetworkSet::from(v.as_str()))
                .unwrap_or(defaults.networks),
            page_url: non_empty("DASHBOARD_PAGE_URL"),
            manual_address: non_empty("WALLET_ADDRESS"),
            wallet_account: non_empty("WALLET_ACCOUNT"),
            demo_address,
            store_path: non_empty("DASHBOARD_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            output_path: non_empty("DASHBOARD_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            fee_period,
            connect_wallet: non_empty("CONNECT_WALLET").is_some_and(|v| v == "1" || v == "true"),
            log_level,
            warnings,
        }
    }
}
