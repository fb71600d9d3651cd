use serde::{Deserialize, Serialize};

use super::charts::{Breakdown, ChartBundle, SeriesData};
use super::lenient;
use super::token::TokenBalance;

/// Full response of `/dashboard/wallet`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardPayload {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub address: Option<String>,
    pub overview: Option<Overview>,
    #[serde(alias = "balances", alias = "tokens", deserialize_with = "lenient::null_as_default")]
    pub wallet_balances: Vec<TokenBalance>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub defi_positions: Vec<DefiPosition>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub transactions: Vec<Transaction>,
    pub charts: Option<ChartBundle>,
}

/// Aggregate USD metrics with their day-over-day percentage deltas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawOverview")]
pub struct Overview {
    pub total_balance: f64,
    pub total_balance_change: f64,
    pub crypto_assets: f64,
    pub crypto_assets_change: f64,
    pub defi_positions: f64,
    pub defi_positions_change: f64,
    pub total_fees: f64,
    pub total_fees_change: f64,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawOverview {
    #[serde(deserialize_with = "lenient::optional_f64")]
    total_balance: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    total_balance_change: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    crypto_assets: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    crypto_assets_change: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    defi_positions: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    defi_positions_change: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    total_fees: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    total_fees_paid: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    total_fees_change: Option<f64>,
    daily_change: Option<DailyChange>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct DailyChange {
    #[serde(deserialize_with = "lenient::optional_f64")]
    total_balance: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    crypto_assets: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    defi_positions: Option<f64>,
    #[serde(alias = "totalFees", deserialize_with = "lenient::optional_f64")]
    total_fees_paid: Option<f64>,
}

impl From<RawOverview> for Overview {
    fn from(raw: RawOverview) -> Self {
        let daily = raw.daily_change.unwrap_or_default();
        Overview {
            total_balance: raw.total_balance.unwrap_or(0.0),
            total_balance_change: raw
                .total_balance_change
                .or(daily.total_balance)
                .unwrap_or(0.0),
            crypto_assets: raw.crypto_assets.unwrap_or(0.0),
            crypto_assets_change: raw
                .crypto_assets_change
                .or(daily.crypto_assets)
                .unwrap_or(0.0),
            defi_positions: raw.defi_positions.unwrap_or(0.0),
            defi_positions_change: raw
                .defi_positions_change
                .or(daily.defi_positions)
                .unwrap_or(0.0),
            total_fees: raw.total_fees.or(raw.total_fees_paid).unwrap_or(0.0),
            total_fees_change: raw
                .total_fees_change
                .or(daily.total_fees_paid)
                .unwrap_or(0.0),
        }
    }
}

/// A stake in a DeFi protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefiPosition {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub protocol: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub protocol_icon: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub network: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::optional_string")]
    pub position_type: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub assets: Vec<PositionAsset>,
    /// Single-asset positions only name the asset.
    #[serde(deserialize_with = "lenient::optional_string")]
    pub asset: Option<String>,
    #[serde(alias = "usdValue", deserialize_with = "lenient::f64_or_zero")]
    pub value: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub value_change: f64,
    #[serde(deserialize_with = "lenient::optional_f64")]
    pub apy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionAsset {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub hash: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub description: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::string_or_empty")]
    pub tx_type: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub date: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub network: Option<String>,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub amount: f64,
    #[serde(alias = "asset", deserialize_with = "lenient::string_or_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub value: f64,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub status: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub explorer_url: Option<String>,
}

/// Response of `/balances`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalancesReport {
    #[serde(alias = "walletBalances", alias = "balances", deserialize_with = "lenient::null_as_default")]
    pub tokens: Vec<TokenBalance>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    pub total_value: Option<f64>,
}

/// Response of `/defi/positions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionsReport {
    #[serde(alias = "defiPositions", deserialize_with = "lenient::null_as_default")]
    pub positions: Vec<DefiPosition>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    pub total_value: Option<f64>,
}

/// Response of `/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionsReport {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub transactions: Vec<Transaction>,
}

/// Response of `/fees`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeesReport {
    #[serde(alias = "totalFeesPaid", deserialize_with = "lenient::optional_f64")]
    pub total_fees: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_f64")]
    pub total_fees_change: Option<f64>,
    pub daily_fees: Option<SeriesData>,
    pub fees_by_network: Option<Breakdown>,
    pub fees_by_type: Option<Breakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_flat_shape() {
        let o: Overview = serde_json::from_str(
            r#"{"totalBalance":1234.5,"totalBalanceChange":-3.2,"totalFeesPaid":"12.4","totalFeesChange":1.5}"#,
        )
        .unwrap();
        assert_eq!(o.total_balance, 1234.5);
        assert_eq!(o.total_balance_change, -3.2);
        assert_eq!(o.total_fees, 12.4);
        assert_eq!(o.total_fees_change, 1.5);
        assert_eq!(o.crypto_assets, 0.0);
    }

    #[test]
    fn overview_daily_change_shape() {
        let o: Overview = serde_json::from_str(
            r#"{"totalBalance":10,"cryptoAssets":8,"defiPositions":2,"totalFeesPaid":1,
                "dailyChange":{"totalBalance":2.5,"cryptoAssets":-1,"defiPositions":4,"totalFeesPaid":-0.5}}"#,
        )
        .unwrap();
        assert_eq!(o.total_balance_change, 2.5);
        assert_eq!(o.crypto_assets_change, -1.0);
        assert_eq!(o.defi_positions_change, 4.0);
        assert_eq!(o.total_fees_change, -0.5);
    }

    #[test]
    fn flat_delta_wins_over_daily_change() {
        let o: Overview = serde_json::from_str(
            r#"{"totalBalanceChange":1.0,"dailyChange":{"totalBalance":9.0}}"#,
        )
        .unwrap();
        assert_eq!(o.total_balance_change, 1.0);
    }

    #[test]
    fn payload_with_nothing_is_empty() {
        let p: DashboardPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(p, DashboardPayload::default());
        let p: DashboardPayload = serde_json::from_str(
            r#"{"overview":null,"walletBalances":null,"transactions":null,"charts":null}"#,
        )
        .unwrap();
        assert!(p.overview.is_none());
        assert!(p.wallet_balances.is_empty());
        assert!(p.transactions.is_empty());
        assert!(p.charts.is_none());
    }

    #[test]
    fn transaction_accepts_asset_alias() {
        let tx: Transaction = serde_json::from_str(
            r#"{"type":"Send","date":"2024-03-01","amount":"0.5","asset":"ETH","status":"Confirmed"}"#,
        )
        .unwrap();
        assert_eq!(tx.symbol, "ETH");
        assert_eq!(tx.amount, 0.5);
        assert_eq!(tx.tx_type, "Send");
    }

    #[test]
    fn numeric_string_fields_do_not_reject_payload() {
        let p: DashboardPayload = serde_json::from_str(
            r#"{
                "transactions": [
                    {"hash": 42, "type": "swap", "time": 1709640000, "network": 1, "explorerUrl": null}
                ],
                "defiPositions": [{"protocol": 3, "name": "Pool", "type": 7, "asset": 9}],
                "walletBalances": [{"symbol": "ETH", "name": 1, "network": "ethereum", "icon": false}]
            }"#,
        )
        .unwrap();

        let tx = &p.transactions[0];
        assert_eq!(tx.hash.as_deref(), Some("42"));
        assert_eq!(tx.time.as_deref(), Some("1709640000"));
        assert_eq!(tx.network.as_deref(), Some("1"));
        assert!(tx.explorer_url.is_none());

        let position = &p.defi_positions[0];
        assert_eq!(position.protocol.as_deref(), Some("3"));
        assert_eq!(position.position_type.as_deref(), Some("7"));
        assert_eq!(position.asset.as_deref(), Some("9"));

        assert_eq!(p.wallet_balances[0].name.as_deref(), Some("1"));
        assert_eq!(p.wallet_balances[0].icon.as_deref(), Some("false"));
    }

    #[test]
    fn string_fields_still_decode_as_strings() {
        let tx: Transaction = serde_json::from_str(
            r#"{"hash":"0xabc","time":"10:30","network":"polygon","explorerUrl":"https://x"}"#,
        )
        .unwrap();
        assert_eq!(tx.hash.as_deref(), Some("0xabc"));
        assert_eq!(tx.time.as_deref(), Some("10:30"));
        assert_eq!(tx.network.as_deref(), Some("polygon"));
        assert_eq!(tx.explorer_url.as_deref(), Some("https://x"));
    }
}
