use tracing::{debug, warn};

use crate::charts::DashboardCharts;
use crate::models::{DashboardPayload, FeesReport, WalletAddress};
use crate::traits::chart_surface::ChartSurface;
use crate::traits::view::DashboardView;

use super::view_model::{DashboardViewModel, MetricCard, MetricId, Notice};

/// State of one open dashboard: its view, chart surface and chart handles,
/// and the address currently on display.
pub struct DashboardSession<V, S> {
    view: V,
    surface: S,
    charts: DashboardCharts,
    displayed: Option<WalletAddress>,
    connected: bool,
}

impl<V: DashboardView, S: ChartSurface> DashboardSession<V, S> {
    pub fn new(view: V, surface: S) -> Self {
        Self {
            view,
            surface,
            charts: DashboardCharts::new(),
            displayed: None,
            connected: false,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn charts(&self) -> &DashboardCharts {
        &self.charts
    }

    pub fn displayed_address(&self) -> Option<&WalletAddress> {
        self.displayed.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Create the four charts. Calling again is a no-op.
    pub fn init_charts(&mut self) {
        if self.charts.is_initialized() {
            debug!("Charts already initialized");
            return;
        }
        self.charts.init_all(&mut self.surface);
    }

    pub fn display_address(&mut self, address: &WalletAddress) {
        self.view.show_address(address);
        self.displayed = Some(address.clone());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.view.set_loading(loading);
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        self.view.set_wallet_connected(connected);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.view.show_notice(&notice);
    }

    pub fn clear_notice(&mut self) {
        self.view.clear_notice();
    }

    /// Replace every section and chart with the payload's content.
    pub fn apply(&mut self, payload: &DashboardPayload) {
        if let Some(echoed) = payload.address.as_deref().filter(|a| !a.is_empty()) {
            match WalletAddress::parse(echoed) {
                Ok(address) => self.display_address(&address),
                Err(_) => warn!("Ignoring malformed address in response: {}", echoed),
            }
        }

        let model = DashboardViewModel::build(payload);
        self.view.render_overview(&model.overview);
        self.view.render_balances(&model.balances);
        self.view.render_positions(&model.positions);
        self.view.render_transactions(&model.transactions);
        self.charts
            .update_from_bundle(&mut self.surface, payload.charts.as_ref());
    }

    /// Apply a `/fees` report to the fee charts and the fees card.
    pub fn apply_fees(&mut self, report: &FeesReport) {
        self.charts.update_fees(&mut self.surface, report);
        if let Some(total) = report.total_fees {
            let card = MetricCard::new(
                MetricId::TotalFees,
                total,
                report.total_fees_change.unwrap_or(0.0),
            );
            self.view.render_metric(&card);
        }
    }
}
