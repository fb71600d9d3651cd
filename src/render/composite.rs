use crate::dashboard::view_model::{
    MetricCard, Notice, PositionCard, Section, TokenRow, TransactionRow,
};
use crate::models::WalletAddress;
use crate::traits::view::DashboardView;

/// Composite view that forwards every render to several views
pub struct CompositeView {
    views: Vec<Box<dyn DashboardView>>,
}

impl CompositeView {
    /// Create a new composite view
    pub fn new() -> Self {
        Self { views: Vec::new() }
    }

    /// Add a view to the composite
    pub fn add_view(&mut self, view: Box<dyn DashboardView>) {
        self.views.push(view);
    }

    /// Check if there are any views
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Number of views
    pub fn len(&self) -> usize {
        self.views.len()
    }
}

impl Default for CompositeView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for CompositeView {
    fn show_address(&mut self, address: &WalletAddress) {
        for view in &mut self.views {
            view.show_address(address);
        }
    }

    fn set_loading(&mut self, loading: bool) {
        for view in &mut self.views {
            view.set_loading(loading);
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        for view in &mut self.views {
            view.show_notice(notice);
        }
    }

    fn clear_notice(&mut self) {
        for view in &mut self.views {
            view.clear_notice();
        }
    }

    fn set_wallet_connected(&mut self, connected: bool) {
        for view in &mut self.views {
            view.set_wallet_connected(connected);
        }
    }

    fn render_overview(&mut self, cards: &Section<MetricCard>) {
        for view in &mut self.views {
            view.render_overview(cards);
        }
    }

    fn render_metric(&mut self, card: &MetricCard) {
        for view in &mut self.views {
            view.render_metric(card);
        }
    }

    fn render_balances(&mut self, rows: &Section<TokenRow>) {
        for view in &mut self.views {
            view.render_balances(rows);
        }
    }

    fn render_positions(&mut self, cards: &Section<PositionCard>) {
        for view in &mut self.views {
            view.render_positions(cards);
        }
    }

    fn render_transactions(&mut self, rows: &Section<TransactionRow>) {
        for view in &mut self.views {
            view.render_transactions(rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ConsoleView, HtmlView};

    #[test]
    fn forwards_to_every_view() {
        let html = HtmlView::new();
        let mut composite = CompositeView::new();
        assert!(composite.is_empty());
        composite.add_view(Box::new(html.clone()));
        composite.add_view(Box::new(ConsoleView::new()));
        assert_eq!(composite.len(), 2);

        composite.render_transactions(&Section::Empty("No transactions found"));
        composite.set_loading(true);
        assert!(html.transactions_html().contains("No transactions found"));
        assert!(html.is_loading());
    }
}
