use crate::dashboard::view_model::{
    MetricCard, Notice, PositionCard, Section, TokenRow, TransactionRow,
};
use crate::models::WalletAddress;

/// Rendering target for dashboard sections.
///
/// Each `render_*` call replaces the whole region: implementations must clear
/// whatever the previous call drew.
pub trait DashboardView: Send {
    /// Bind the address shown in the header.
    fn show_address(&mut self, address: &WalletAddress);

    fn set_loading(&mut self, loading: bool);

    /// Show a transient banner. Dismissal after `notice.dismiss_after` is up to the view.
    fn show_notice(&mut self, notice: &Notice);

    /// Remove the current banner, if any.
    fn clear_notice(&mut self);

    fn set_wallet_connected(&mut self, connected: bool);

    fn render_overview(&mut self, cards: &Section<MetricCard>);

    /// Replace a single overview card, leaving the others untouched.
    fn render_metric(&mut self, card: &MetricCard);

    fn render_balances(&mut self, rows: &Section<TokenRow>);

    fn render_positions(&mut self, cards: &Section<PositionCard>);

    fn render_transactions(&mut self, rows: &Section<TransactionRow>);
}
