use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    BalancesReport, DashboardPayload, FeesReport, NetworkSet, PositionsReport,
    TransactionsReport,
};

/// Fee aggregation window accepted by `/fees`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeePeriod {
    SevenDays,
    #[default]
    ThirtyDays,
    NinetyDays,
    All,
}

impl FeePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeePeriod::SevenDays => "7d",
            FeePeriod::ThirtyDays => "30d",
            FeePeriod::NinetyDays => "90d",
            FeePeriod::All => "all",
        }
    }
}

impl std::str::FromStr for FeePeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(FeePeriod::SevenDays),
            "30d" => Ok(FeePeriod::ThirtyDays),
            "90d" => Ok(FeePeriod::NinetyDays),
            "all" => Ok(FeePeriod::All),
            other => Err(format!("unknown fee period: {}", other)),
        }
    }
}

/// Source of dashboard data for a wallet.
///
/// Addresses are taken as raw strings: implementations validate them and fail
/// with `InvalidAddress` before doing any I/O.
#[async_trait]
pub trait DashboardDataProvider: Send + Sync {
    /// Fetch the full dashboard payload
    async fn fetch_dashboard_data(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<DashboardPayload>;

    async fn fetch_wallet_balances(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<BalancesReport>;

    async fn fetch_defi_positions(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<PositionsReport>;

    /// `limit` defaults to 50
    async fn fetch_transactions(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
        limit: Option<u32>,
    ) -> Result<TransactionsReport>;

    async fn fetch_gas_fees(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
        period: FeePeriod,
    ) -> Result<FeesReport>;
}
