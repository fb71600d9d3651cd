use tracing::{debug, error, warn};

use crate::models::{ChartBundle, FeesReport, SeriesData};
use crate::traits::chart_surface::{ChartHandle, ChartSurface};

use super::config::{
    network_color, ChartConfig, ChartData, ChartKind, ChartStyle, Legend, TooltipFormat,
    FEE_TYPE_PALETTE,
};

pub const PORTFOLIO_TARGET: &str = "portfolioChart";
pub const FEES_TARGET: &str = "feesChart";
pub const FEES_BY_NETWORK_TARGET: &str = "feesByNetworkChart";
pub const FEES_BY_TYPE_TARGET: &str = "feesByTypeChart";

/// One chart on a surface: create it once, then swap its data.
pub trait ChartAdapter {
    fn name(&self) -> &'static str;

    /// Fixed visual configuration with empty data
    fn config(&self) -> ChartConfig;

    fn handle(&self) -> Option<ChartHandle>;

    fn bind(&mut self, handle: ChartHandle);

    /// Shape a series into chart data
    fn shape(&self, series: &SeriesData) -> ChartData {
        ChartData::from_series(series, self.config().tooltip)
    }

    fn init(&mut self, surface: &mut dyn ChartSurface, target: &str) -> ChartHandle {
        let handle = surface.create_chart(target, self.config());
        debug!("{} chart bound to {} as #{}", self.name(), target, handle.id());
        self.bind(handle);
        handle
    }

    /// Replace the chart's data. Before `init` this only logs.
    fn update(&mut self, surface: &mut dyn ChartSurface, series: &SeriesData) {
        let Some(handle) = self.handle() else {
            error!("{} chart not initialized", self.name());
            return;
        };
        if !surface.replace_data(handle, self.shape(series)) {
            warn!("{} chart #{} no longer exists on surface", self.name(), handle.id());
        }
    }
}

fn doughnut_style(background_colors: Vec<String>) -> ChartStyle {
    ChartStyle {
        border_color: Some("rgba(17, 25, 40, 0.7)".to_string()),
        background_colors,
        border_width: 2,
        fill: false,
        tension: None,
        border_radius: None,
        cutout: Some("70%".to_string()),
    }
}

/// Portfolio value over time.
#[derive(Debug, Default)]
pub struct PortfolioChart {
    handle: Option<ChartHandle>,
}

impl ChartAdapter for PortfolioChart {
    fn name(&self) -> &'static str {
        "Portfolio"
    }

    fn config(&self) -> ChartConfig {
        ChartConfig {
            kind: ChartKind::Line,
            dataset_label: Some("Portfolio Value (USD)".to_string()),
            style: ChartStyle {
                border_color: Some("#6366f1".to_string()),
                background_colors: vec!["rgba(99, 102, 241, 0.5)".to_string()],
                border_width: 2,
                fill: true,
                tension: Some(0.4),
                border_radius: None,
                cutout: None,
            },
            legend: Legend::hidden(),
            tooltip: TooltipFormat::Currency,
            currency_axis: true,
            data: ChartData::default(),
        }
    }

    fn handle(&self) -> Option<ChartHandle> {
        self.handle
    }

    fn bind(&mut self, handle: ChartHandle) {
        self.handle = Some(handle);
    }
}

/// Daily gas fees.
#[derive(Debug, Default)]
pub struct FeesChart {
    handle: Option<ChartHandle>,
}

impl ChartAdapter for FeesChart {
    fn name(&self) -> &'static str {
        "Fees"
    }

    fn config(&self) -> ChartConfig {
        ChartConfig {
            kind: ChartKind::Bar,
            dataset_label: Some("Gas Fees (USD)".to_string()),
            style: ChartStyle {
                border_color: None,
                background_colors: vec!["#ef4444".to_string()],
                border_width: 0,
                fill: false,
                tension: None,
                border_radius: Some(4),
                cutout: None,
            },
            legend: Legend::hidden(),
            tooltip: TooltipFormat::Currency,
            currency_axis: true,
            data: ChartData::default(),
        }
    }

    fn handle(&self) -> Option<ChartHandle> {
        self.handle
    }

    fn bind(&mut self, handle: ChartHandle) {
        self.handle = Some(handle);
    }
}

/// Fee share per network. Segment colours follow the network, not the position.
#[derive(Debug, Default)]
pub struct FeesByNetworkChart {
    handle: Option<ChartHandle>,
}

impl ChartAdapter for FeesByNetworkChart {
    fn name(&self) -> &'static str {
        "Fees by network"
    }

    fn config(&self) -> ChartConfig {
        ChartConfig {
            kind: ChartKind::Doughnut,
            dataset_label: None,
            style: doughnut_style(Vec::new()),
            legend: Legend::right(),
            tooltip: TooltipFormat::CurrencyWithShare,
            currency_axis: false,
            data: ChartData::default(),
        }
    }

    fn handle(&self) -> Option<ChartHandle> {
        self.handle
    }

    fn bind(&mut self, handle: ChartHandle) {
        self.handle = Some(handle);
    }

    fn shape(&self, series: &SeriesData) -> ChartData {
        let colors = series
            .labels
            .iter()
            .map(|label| network_color(label).to_string())
            .collect();
        ChartData::from_series(series, TooltipFormat::CurrencyWithShare).with_colors(colors)
    }
}

/// Fee share per transaction type.
#[derive(Debug, Default)]
pub struct FeesByTypeChart {
    handle: Option<ChartHandle>,
}

impl ChartAdapter for FeesByTypeChart {
    fn name(&self) -> &'static str {
        "Fees by type"
    }

    fn config(&self) -> ChartConfig {
        ChartConfig {
            kind: ChartKind::Doughnut,
            dataset_label: None,
            style: doughnut_style(FEE_TYPE_PALETTE.iter().map(|c| c.to_string()).collect()),
            legend: Legend::right(),
            tooltip: TooltipFormat::CurrencyWithShare,
            currency_axis: false,
            data: ChartData::default(),
        }
    }

    fn handle(&self) -> Option<ChartHandle> {
        self.handle
    }

    fn bind(&mut self, handle: ChartHandle) {
        self.handle = Some(handle);
    }
}

/// The four dashboard charts, owned by a session.
#[derive(Debug, Default)]
pub struct DashboardCharts {
    pub portfolio: PortfolioChart,
    pub fees: FeesChart,
    pub fees_by_network: FeesByNetworkChart,
    pub fees_by_type: FeesByTypeChart,
}

impl DashboardCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_all(&mut self, surface: &mut dyn ChartSurface) {
        self.portfolio.init(surface, PORTFOLIO_TARGET);
        self.fees.init(surface, FEES_TARGET);
        self.fees_by_network.init(surface, FEES_BY_NETWORK_TARGET);
        self.fees_by_type.init(surface, FEES_BY_TYPE_TARGET);
    }

    pub fn is_initialized(&self) -> bool {
        self.portfolio.handle().is_some()
            && self.fees.handle().is_some()
            && self.fees_by_network.handle().is_some()
            && self.fees_by_type.handle().is_some()
    }

    /// Push a payload's chart bundle. Missing series clear their chart.
    pub fn update_from_bundle(&mut self, surface: &mut dyn ChartSurface, bundle: Option<&ChartBundle>) {
        let empty = SeriesData::default();
        let bundle = bundle.cloned().unwrap_or_default();

        self.portfolio
            .update(surface, bundle.portfolio_history.as_ref().unwrap_or(&empty));
        self.fees
            .update(surface, bundle.daily_fees.as_ref().unwrap_or(&empty));
        self.fees_by_network.update(
            surface,
            bundle.fees_by_network.as_ref().map(|b| b.series()).unwrap_or(&empty),
        );
        self.fees_by_type.update(
            surface,
            bundle.fees_by_type.as_ref().map(|b| b.series()).unwrap_or(&empty),
        );
    }

    /// Push a `/fees` report into the three fee charts.
    pub fn update_fees(&mut self, surface: &mut dyn ChartSurface, report: &FeesReport) {
        let empty = SeriesData::default();
        self.fees
            .update(surface, report.daily_fees.as_ref().unwrap_or(&empty));
        self.fees_by_network.update(
            surface,
            report.fees_by_network.as_ref().map(|b| b.series()).unwrap_or(&empty),
        );
        self.fees_by_type.update(
            surface,
            report.fees_by_type.as_ref().map(|b| b.series()).unwrap_or(&empty),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::html_surface::HtmlChartSurface;

    fn series(labels: &[&str], values: &[f64]) -> SeriesData {
        SeriesData::new(labels.iter().map(|s| s.to_string()).collect(), values.to_vec())
    }

    #[test]
    fn update_before_init_is_a_no_op() {
        let mut surface = HtmlChartSurface::new();
        let mut charts = DashboardCharts::new();

        charts.portfolio.update(&mut surface, &series(&["Mon"], &[1.0]));
        charts.fees.update(&mut surface, &series(&["Mon"], &[1.0]));
        charts.fees_by_network.update(&mut surface, &series(&["ethereum"], &[1.0]));
        charts.fees_by_type.update(&mut surface, &series(&["swap"], &[1.0]));

        assert!(surface.is_empty());
        assert!(!charts.is_initialized());
    }

    #[test]
    fn init_creates_empty_chart_on_target() {
        let mut surface = HtmlChartSurface::new();
        let mut chart = PortfolioChart::default();
        let handle = chart.init(&mut surface, PORTFOLIO_TARGET);

        let config = surface.chart(handle).unwrap();
        assert_eq!(config.kind, ChartKind::Line);
        assert!(config.data.is_empty());
        assert_eq!(surface.target_of(handle), Some(PORTFOLIO_TARGET));
    }

    #[test]
    fn update_replaces_data_on_same_chart() {
        let mut surface = HtmlChartSurface::new();
        let mut chart = FeesChart::default();
        let handle = chart.init(&mut surface, FEES_TARGET);

        chart.update(&mut surface, &series(&["Mon", "Tue"], &[1.0, 2.0]));
        chart.update(&mut surface, &series(&["Wed"], &[5.0]));

        assert_eq!(surface.len(), 1);
        let data = &surface.chart(handle).unwrap().data;
        assert_eq!(data.labels, vec!["Wed"]);
        assert_eq!(data.values, vec![5.0]);
        assert_eq!(data.tooltips, vec!["$5.00"]);
        assert_eq!(surface.redraws(handle), 2);
    }

    #[test]
    fn network_colors_are_stable_across_renders() {
        let mut surface = HtmlChartSurface::new();
        let mut chart = FeesByNetworkChart::default();
        let handle = chart.init(&mut surface, FEES_BY_NETWORK_TARGET);

        chart.update(&mut surface, &series(&["Ethereum", "polygon", "zksync"], &[2.0, 1.0, 1.0]));
        let first = surface.chart(handle).unwrap().data.colors.clone();
        chart.update(&mut surface, &series(&["polygon", "Ethereum"], &[1.0, 3.0]));
        let second = surface.chart(handle).unwrap().data.colors.clone();

        assert_eq!(
            first,
            Some(vec!["#627EEA".to_string(), "#8247E5".to_string(), "#6366f1".to_string()])
        );
        assert_eq!(second, Some(vec!["#8247E5".to_string(), "#627EEA".to_string()]));
        assert_eq!(
            surface.chart(handle).unwrap().data.tooltips,
            vec!["$1.00 (25%)", "$3.00 (75%)"]
        );
    }

    #[test]
    fn missing_bundle_clears_every_chart() {
        let mut surface = HtmlChartSurface::new();
        let mut charts = DashboardCharts::new();
        charts.init_all(&mut surface);

        let bundle: ChartBundle = serde_json::from_str(
            r#"{"portfolioHistory":{"labels":["a"],"values":[1]},"feesByType":[{"type":"swap","value":2}]}"#,
        )
        .unwrap();
        charts.update_from_bundle(&mut surface, Some(&bundle));
        charts.update_from_bundle(&mut surface, None);

        for handle in surface.handles() {
            assert!(surface.chart(handle).unwrap().data.is_empty());
        }
    }
}
