use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{DashboardError, Result};
use crate::models::{
    is_valid_address, BalancesReport, DashboardPayload, FeesReport, NetworkSet,
    PositionsReport, TransactionsReport,
};
use crate::traits::data_provider::{DashboardDataProvider, FeePeriod};

pub const DEFAULT_API_URL: &str = "http://crypto-invest-dashboard-api.vercel.app/api";
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 50;

/// Dashboard backend over HTTP. One attempt per call: no retries, no timeout.
#[derive(Clone)]
pub struct HttpDataProvider {
    client: Client,
    base_url: String,
}

impl HttpDataProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn check_address(address: &str) -> Result<()> {
        if address.is_empty() || address == "undefined" || !is_valid_address(address) {
            return Err(DashboardError::InvalidAddress);
        }
        Ok(())
    }

    /// Issue a GET and return the decoded JSON body.
    ///
    /// `what` names the resource in the fallback error message.
    async fn get_json(&self, path: &str, query: &[(&str, String)], what: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::request_failed(
                error_message(&body, status, what),
                Some(status.as_u16()),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            DashboardError::request_failed(
                format!("Invalid response while fetching {}: {}", what, e),
                Some(status.as_u16()),
            )
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let value = self.get_json(path, query, what).await?;
        serde_json::from_value(value).map_err(|e| {
            DashboardError::request_failed(format!("Invalid {} response: {}", what, e), None)
        })
    }

    fn wallet_query(address: &str, networks: Option<&NetworkSet>) -> Vec<(&'static str, String)> {
        let networks = networks
            .map(NetworkSet::query_value)
            .unwrap_or_else(|| NetworkSet::DEFAULT.to_string());
        vec![("address", address.to_string()), ("networks", networks)]
    }

    /// Full dashboard response exactly as the API sent it.
    pub async fn fetch_dashboard_json(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<Value> {
        Self::check_address(address).map_err(log_failure("dashboard data"))?;
        self.get_json(
            "/dashboard/wallet",
            &Self::wallet_query(address, networks),
            "dashboard data",
        )
        .await
        .map_err(log_failure("dashboard data"))
    }
}

/// Message from a JSON error body, or the generic status message.
fn error_message(body: &str, status: StatusCode, what: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Failed to fetch {}: {}", what, status.as_u16()))
}

fn log_failure(what: &'static str) -> impl Fn(DashboardError) -> DashboardError {
    move |e| {
        error!("Error fetching {}: {}", what, e);
        e
    }
}

#[async_trait]
impl DashboardDataProvider for HttpDataProvider {
    async fn fetch_dashboard_data(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<DashboardPayload> {
        Self::check_address(address).map_err(log_failure("dashboard data"))?;
        self.get(
            "/dashboard/wallet",
            &Self::wallet_query(address, networks),
            "dashboard data",
        )
        .await
        .map_err(log_failure("dashboard data"))
    }

    async fn fetch_wallet_balances(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<BalancesReport> {
        Self::check_address(address).map_err(log_failure("wallet balances"))?;
        self.get("/balances", &Self::wallet_query(address, networks), "wallet balances")
            .await
            .map_err(log_failure("wallet balances"))
    }

    async fn fetch_defi_positions(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
    ) -> Result<PositionsReport> {
        Self::check_address(address).map_err(log_failure("DeFi positions"))?;
        self.get(
            "/defi/positions",
            &Self::wallet_query(address, networks),
            "DeFi positions",
        )
        .await
        .map_err(log_failure("DeFi positions"))
    }

    async fn fetch_transactions(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
        limit: Option<u32>,
    ) -> Result<TransactionsReport> {
        Self::check_address(address).map_err(log_failure("transaction history"))?;
        let mut query = Self::wallet_query(address, networks);
        query.push((
            "limit",
            limit.unwrap_or(DEFAULT_TRANSACTION_LIMIT).to_string(),
        ));
        self.get("/transactions", &query, "transaction history")
            .await
            .map_err(log_failure("transaction history"))
    }

    async fn fetch_gas_fees(
        &self,
        address: &str,
        networks: Option<&NetworkSet>,
        period: FeePeriod,
    ) -> Result<FeesReport> {
        Self::check_address(address).map_err(log_failure("gas fees"))?;
        let mut query = Self::wallet_query(address, networks);
        query.push(("period", period.as_str().to_string()));
        self.get("/fees", &query, "gas fees")
            .await
            .map_err(log_failure("gas fees"))
    }
}
