//! Payload to view-model mapping. Nothing here touches a rendering surface.

use std::time::Duration;

use crate::models::{DashboardPayload, DefiPosition, Overview, TokenBalance, Transaction};
use crate::utils::format::{
    capitalize_first_letter, format_date, format_number, format_percent_change,
    format_token_amount, format_usd,
};

pub const NO_OVERVIEW: &str = "No overview data available";
pub const NO_ASSETS: &str = "No assets found";
pub const NO_POSITIONS: &str = "No DeFi positions found";
pub const NO_TRANSACTIONS: &str = "No transactions found";

/// A rendered region: rows, or an explicit empty state.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Rows(Vec<T>),
    Empty(&'static str),
}

impl<T> Section<T> {
    pub fn from_rows(rows: Vec<T>, empty_message: &'static str) -> Self {
        if rows.is_empty() {
            Section::Empty(empty_message)
        } else {
            Section::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Section::Rows(rows) => rows,
            Section::Empty(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Section::Empty(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }
}

/// Which direction of change counts as good for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Signed percentage text plus its styling.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeIndicator {
    pub text: String,
    pub trend: Trend,
}

impl ChangeIndicator {
    /// The text always carries the real sign; only the styling follows `polarity`.
    pub fn new(change: f64, polarity: Polarity) -> Self {
        let change = if change.is_finite() { change } else { 0.0 };
        let good = match polarity {
            Polarity::HigherIsBetter => change >= 0.0,
            Polarity::LowerIsBetter => change <= 0.0,
        };
        Self {
            text: format_percent_change(change),
            trend: if good { Trend::Positive } else { Trend::Negative },
        }
    }

    pub fn css_class(&self) -> String {
        format!("card-change {}", self.trend.css_class())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    TotalBalance,
    CryptoAssets,
    DefiPositions,
    TotalFees,
}

impl MetricId {
    pub const ALL: [MetricId; 4] = [
        MetricId::TotalBalance,
        MetricId::CryptoAssets,
        MetricId::DefiPositions,
        MetricId::TotalFees,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            MetricId::TotalBalance => "totalBalance",
            MetricId::CryptoAssets => "cryptoAssets",
            MetricId::DefiPositions => "defiPositions",
            MetricId::TotalFees => "totalFees",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricId::TotalBalance => "Total Balance",
            MetricId::CryptoAssets => "Crypto Assets",
            MetricId::DefiPositions => "DeFi Positions",
            MetricId::TotalFees => "Fees Paid",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            MetricId::TotalFees => Polarity::LowerIsBetter,
            _ => Polarity::HigherIsBetter,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub id: MetricId,
    pub value: String,
    pub change: ChangeIndicator,
}

impl MetricCard {
    pub fn new(id: MetricId, value: f64, change: f64) -> Self {
        Self {
            id,
            value: format_usd(value),
            change: ChangeIndicator::new(change, id.polarity()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub symbol: String,
    pub name: String,
    pub network: String,
    pub icon: Option<String>,
    pub amount: String,
    pub price: String,
    pub price_change: ChangeIndicator,
    pub value: String,
    /// Share of the wallet's token value, 0 to 100
    pub share: f64,
    pub share_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetChip {
    pub symbol: String,
    pub text: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionCard {
    pub title: String,
    pub protocol: String,
    pub protocol_icon: Option<String>,
    pub network: String,
    pub position_type: String,
    pub assets: Vec<AssetChip>,
    pub value: String,
    pub value_change: ChangeIndicator,
    pub apy: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub title: String,
    pub date: String,
    pub network: String,
    pub kind: String,
    pub type_class: &'static str,
    pub icon: &'static str,
    pub amount: String,
    /// Set for sends and receives
    pub direction: Option<Trend>,
    pub value: String,
    pub status: String,
    pub status_class: String,
    pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
}

/// Transient banner message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            dismiss_after: Duration::from_secs(5),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            dismiss_after: Duration::from_secs(3),
        }
    }
}

/// Everything the sections of one dashboard render need.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViewModel {
    pub overview: Section<MetricCard>,
    pub balances: Section<TokenRow>,
    pub positions: Section<PositionCard>,
    pub transactions: Section<TransactionRow>,
}

impl DashboardViewModel {
    pub fn build(payload: &DashboardPayload) -> Self {
        Self {
            overview: match &payload.overview {
                Some(overview) => Section::Rows(metric_cards(overview)),
                None => Section::Empty(NO_OVERVIEW),
            },
            balances: Section::from_rows(token_rows(&payload.wallet_balances), NO_ASSETS),
            positions: Section::from_rows(
                payload.defi_positions.iter().map(position_card).collect(),
                NO_POSITIONS,
            ),
            transactions: Section::from_rows(
                payload.transactions.iter().map(transaction_row).collect(),
                NO_TRANSACTIONS,
            ),
        }
    }
}

pub fn metric_cards(overview: &Overview) -> Vec<MetricCard> {
    vec![
        MetricCard::new(
            MetricId::TotalBalance,
            overview.total_balance,
            overview.total_balance_change,
        ),
        MetricCard::new(
            MetricId::CryptoAssets,
            overview.crypto_assets,
            overview.crypto_assets_change,
        ),
        MetricCard::new(
            MetricId::DefiPositions,
            overview.defi_positions,
            overview.defi_positions_change,
        ),
        MetricCard::new(MetricId::TotalFees, overview.total_fees, overview.total_fees_change),
    ]
}

pub fn token_rows(tokens: &[TokenBalance]) -> Vec<TokenRow> {
    let total: f64 = tokens.iter().map(|t| t.value).sum();
    tokens
        .iter()
        .map(|token| {
            let share = if total > 0.0 { token.value / total * 100.0 } else { 0.0 };
            TokenRow {
                symbol: token.symbol.clone(),
                name: token.display_name().to_string(),
                network: token.network.clone().unwrap_or_default(),
                icon: token.icon.clone(),
                amount: format_token_amount(token.ui_amount(), &token.symbol),
                price: format_usd(token.price),
                price_change: ChangeIndicator::new(token.price_change_24h, Polarity::HigherIsBetter),
                value: format_usd(token.value),
                share,
                share_text: format!("{}%", format_number(share, 1)),
            }
        })
        .collect()
}

pub fn position_card(position: &DefiPosition) -> PositionCard {
    let protocol = position
        .protocol
        .clone()
        .unwrap_or_else(|| "Unknown Protocol".to_string());

    let mut assets: Vec<AssetChip> = position
        .assets
        .iter()
        .map(|asset| AssetChip {
            symbol: asset.symbol.clone(),
            text: format_token_amount(asset.amount, &asset.symbol),
            icon: asset.icon.clone(),
        })
        .collect();
    if assets.is_empty() {
        if let Some(asset) = &position.asset {
            assets.push(AssetChip {
                symbol: asset.clone(),
                text: asset.clone(),
                icon: None,
            });
        }
    }

    PositionCard {
        title: position.name.clone().unwrap_or_else(|| protocol.clone()),
        protocol,
        protocol_icon: position.protocol_icon.clone(),
        network: position
            .network
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        position_type: position
            .position_type
            .clone()
            .unwrap_or_else(|| "Deposit".to_string()),
        assets,
        value: format_usd(position.value),
        value_change: ChangeIndicator::new(position.value_change, Polarity::HigherIsBetter),
        apy: position.apy.map(|apy| format!("{}%", format_number(apy, 2))),
    }
}

/// Style class for a transaction type.
pub fn tx_type_class(kind: &str) -> &'static str {
    match kind.to_lowercase().as_str() {
        "swap" => "tx-swap",
        "transfer" => "tx-transfer",
        "deposit" => "tx-deposit",
        "withdraw" => "tx-withdraw",
        "approve" => "tx-approve",
        "nft" => "tx-nft",
        _ => "tx-default",
    }
}

/// Icon for a transaction type.
pub fn tx_type_icon(kind: &str) -> &'static str {
    match kind.to_lowercase().as_str() {
        "swap" => "fa-exchange-alt",
        "transfer" => "fa-arrow-right",
        "deposit" => "fa-arrow-down",
        "withdraw" => "fa-arrow-up",
        "approve" => "fa-check-circle",
        "nft" => "fa-image",
        _ => "fa-circle",
    }
}

pub fn transaction_row(tx: &Transaction) -> TransactionRow {
    let direction = match tx.tx_type.to_lowercase().as_str() {
        "send" => Some(Trend::Negative),
        "receive" => Some(Trend::Positive),
        _ => None,
    };
    let prefix = match direction {
        Some(Trend::Negative) => "-",
        Some(Trend::Positive) => "+",
        None => "",
    };

    let mut date = format_date(&tx.date);
    if let Some(time) = tx.time.as_deref().filter(|t| !t.is_empty()) {
        date = format!("{} {}", date, time);
    }

    let title = match tx.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => description.to_string(),
        None => format!("{} {}", capitalize_first_letter(&tx.tx_type), tx.symbol)
            .trim()
            .to_string(),
    };

    TransactionRow {
        title,
        date,
        network: tx.network.clone().unwrap_or_default(),
        kind: tx.tx_type.clone(),
        type_class: tx_type_class(&tx.tx_type),
        icon: tx_type_icon(&tx.tx_type),
        amount: format!("{}{}", prefix, format_token_amount(tx.amount, &tx.symbol)),
        direction,
        value: format_usd(tx.value),
        status: tx.status.clone(),
        status_class: tx.status.to_lowercase(),
        explorer_url: tx.explorer_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> DashboardPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn overview_balance_and_negative_change() {
        let vm = DashboardViewModel::build(&payload(
            r#"{"overview":{"totalBalance":1234.5,"totalBalanceChange":-3.2}}"#,
        ));
        let card = &vm.overview.rows()[0];
        assert_eq!(card.id, MetricId::TotalBalance);
        assert_eq!(card.value, "$1,234.50");
        assert_eq!(card.change.text, "-3.2%");
        assert_eq!(card.change.trend, Trend::Negative);
        assert_eq!(card.change.css_class(), "card-change negative");
    }

    #[test]
    fn fee_increase_keeps_sign_but_styles_negative() {
        let vm = DashboardViewModel::build(&payload(
            r#"{"overview":{"totalFees":20,"totalFeesChange":5}}"#,
        ));
        let fees = vm
            .overview
            .rows()
            .iter()
            .find(|c| c.id == MetricId::TotalFees)
            .unwrap();
        assert_eq!(fees.value, "$20.00");
        assert_eq!(fees.change.text, "+5%");
        assert_eq!(fees.change.trend, Trend::Negative);

        let lower = MetricCard::new(MetricId::TotalFees, 10.0, -2.0);
        assert_eq!(lower.change.text, "-2%");
        assert_eq!(lower.change.trend, Trend::Positive);
    }

    #[test]
    fn empty_sections_render_explicit_empty_state() {
        let vm = DashboardViewModel::build(&payload(r#"{"transactions":[]}"#));
        assert_eq!(vm.transactions, Section::Empty(NO_TRANSACTIONS));
        assert_eq!(vm.balances, Section::Empty(NO_ASSETS));
        assert_eq!(vm.positions, Section::Empty(NO_POSITIONS));
        assert_eq!(vm.overview, Section::Empty(NO_OVERVIEW));
    }

    #[test]
    fn token_rows_share_of_total() {
        let rows = token_rows(&[
            TokenBalance {
                symbol: "ETH".into(),
                balance: 1.0,
                value: 300.0,
                ..Default::default()
            },
            TokenBalance {
                symbol: "USDC".into(),
                balance: 100.0,
                value: 100.0,
                ..Default::default()
            },
        ]);
        assert_eq!(rows[0].share_text, "75.0%");
        assert_eq!(rows[1].share_text, "25.0%");
        assert_eq!(rows[0].amount, "1.00 ETH");
    }

    #[test]
    fn token_rows_with_zero_total() {
        let rows = token_rows(&[TokenBalance {
            symbol: "DUST".into(),
            ..Default::default()
        }]);
        assert_eq!(rows[0].share, 0.0);
        assert_eq!(rows[0].share_text, "0.0%");
    }

    #[test]
    fn position_card_defaults() {
        let card = position_card(&DefiPosition {
            asset: Some("stETH".into()),
            apy: Some(3.456),
            value: 1500.0,
            ..Default::default()
        });
        assert_eq!(card.title, "Unknown Protocol");
        assert_eq!(card.network, "Unknown");
        assert_eq!(card.position_type, "Deposit");
        assert_eq!(card.assets[0].text, "stETH");
        assert_eq!(card.apy.as_deref(), Some("3.46%"));
        assert_eq!(card.value, "$1,500.00");
    }

    #[test]
    fn transaction_type_mapping() {
        assert_eq!(tx_type_class("Swap"), "tx-swap");
        assert_eq!(tx_type_icon("NFT"), "fa-image");
        assert_eq!(tx_type_class("bridge"), "tx-default");
        assert_eq!(tx_type_icon("bridge"), "fa-circle");
    }

    #[test]
    fn send_and_receive_are_signed() {
        let send = transaction_row(&Transaction {
            tx_type: "Send".into(),
            amount: 0.5,
            symbol: "ETH".into(),
            status: "Confirmed".into(),
            date: "2024-03-05".into(),
            ..Default::default()
        });
        assert_eq!(send.amount, "-0.50 ETH");
        assert_eq!(send.direction, Some(Trend::Negative));
        assert_eq!(send.status_class, "confirmed");
        assert_eq!(send.date, "Mar 5, 2024");
        assert_eq!(send.title, "Send ETH");

        let receive = transaction_row(&Transaction {
            tx_type: "Receive".into(),
            amount: 2.0,
            symbol: "USDC".into(),
            description: Some("Payment".into()),
            ..Default::default()
        });
        assert_eq!(receive.amount, "+2.00 USDC");
        assert_eq!(receive.title, "Payment");
    }
}
