use tracing::{error, info};

use crate::dashboard::view_model::{
    MetricCard, Notice, NoticeLevel, PositionCard, Section, TokenRow, TransactionRow,
};
use crate::models::WalletAddress;
use crate::traits::view::DashboardView;

/// Console logging view
pub struct ConsoleView;

impl ConsoleView {
    /// Create a new console view
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

fn log_empty<T>(title: &str, section: &Section<T>) -> bool {
    if let Section::Empty(message) = section {
        info!("{}: {}", title, message);
        return true;
    }
    false
}

impl DashboardView for ConsoleView {
    fn show_address(&mut self, address: &WalletAddress) {
        info!("Wallet: {} ({})", address.short(), address);
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            info!("Loading dashboard data...");
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Error => error!("{}", notice.message),
            NoticeLevel::Success => info!("{}", notice.message),
        }
    }

    fn clear_notice(&mut self) {}

    fn set_wallet_connected(&mut self, connected: bool) {
        if connected {
            info!("Wallet Connected");
        }
    }

    fn render_overview(&mut self, cards: &Section<MetricCard>) {
        if log_empty("Overview", cards) {
            return;
        }
        info!("{}", "=".repeat(80));
        for card in cards.rows() {
            self.render_metric(card);
        }
    }

    fn render_metric(&mut self, card: &MetricCard) {
        info!(
            "  {:<16} {:>18}  {}",
            card.id.title(),
            card.value,
            card.change.text
        );
    }

    fn render_balances(&mut self, rows: &Section<TokenRow>) {
        if log_empty("Assets", rows) {
            return;
        }
        info!("Assets:");
        info!("{}", "-".repeat(80));
        for row in rows.rows() {
            info!(
                "  {} ({}) on {}",
                row.symbol,
                row.name,
                if row.network.is_empty() { "-" } else { row.network.as_str() }
            );
            info!("     Amount: {}", row.amount);
            info!("     Price: {} ({})", row.price, row.price_change.text);
            info!("     Value: {} [{}]", row.value, row.share_text);
        }
    }

    fn render_positions(&mut self, cards: &Section<PositionCard>) {
        if log_empty("DeFi positions", cards) {
            return;
        }
        info!("DeFi positions:");
        info!("{}", "-".repeat(80));
        for card in cards.rows() {
            info!("  {} [{}] on {}", card.title, card.position_type, card.network);
            let assets: Vec<&str> = card.assets.iter().map(|a| a.text.as_str()).collect();
            if !assets.is_empty() {
                info!("     Assets: {}", assets.join(", "));
            }
            info!("     Value: {} ({})", card.value, card.value_change.text);
            if let Some(apy) = &card.apy {
                info!("     APY: {}", apy);
            }
        }
    }

    fn render_transactions(&mut self, rows: &Section<TransactionRow>) {
        if log_empty("Transactions", rows) {
            return;
        }
        info!("Transactions:");
        info!("{}", "-".repeat(80));
        for row in rows.rows() {
            info!(
                "  {} | {} | {} | {} | {}",
                row.date, row.title, row.amount, row.value, row.status
            );
        }
        info!("{}", "=".repeat(80));
    }
}
