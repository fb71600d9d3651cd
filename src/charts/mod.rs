//! Chart adapters and their fixed configurations

pub mod adapters;
pub mod config;
pub mod tooltip;

pub use adapters::{
    ChartAdapter, DashboardCharts, FeesByNetworkChart, FeesByTypeChart, FeesChart,
    PortfolioChart,
};
pub use config::{network_color, ChartConfig, ChartData, ChartKind, TooltipFormat};
