use serde::Serialize;

use crate::models::SeriesData;

use super::tooltip;

pub const DEFAULT_NETWORK_COLOR: &str = "#6366f1";

const NETWORK_COLORS: &[(&str, &str)] = &[
    ("ethereum", "#627EEA"),
    ("polygon", "#8247E5"),
    ("bsc", "#F3BA2F"),
    ("optimism", "#FF0420"),
    ("arbitrum", "#28A0F0"),
    ("avalanche", "#E84142"),
    ("fantom", "#1969FF"),
];

/// Swaps, transfers, defi, nft, other.
pub const FEE_TYPE_PALETTE: &[&str] = &["#4ade80", "#f97316", "#8b5cf6", "#a78bfa", "#38bdf8"];

/// Colour for a network label, case-insensitive.
pub fn network_color(network: &str) -> &'static str {
    let key = network.trim().to_lowercase();
    NETWORK_COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_NETWORK_COLOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: LegendPosition,
}

impl Legend {
    pub fn hidden() -> Self {
        Self {
            display: false,
            position: LegendPosition::Top,
        }
    }

    pub fn right() -> Self {
        Self {
            display: true,
            position: LegendPosition::Right,
        }
    }
}

/// How tooltip text is derived from a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipFormat {
    /// `$1,234.50`
    Currency,
    /// `$1,234.50 (42%)`, share of the dataset total
    CurrencyWithShare,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub border_color: Option<String>,
    pub background_colors: Vec<String>,
    pub border_width: u32,
    pub fill: bool,
    pub tension: Option<f64>,
    pub border_radius: Option<u32>,
    pub cutout: Option<String>,
}

/// Data currently bound to a chart, with precomputed tooltip text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Per-point colours; `None` keeps the style's background colours.
    pub colors: Option<Vec<String>>,
    pub tooltips: Vec<String>,
}

impl ChartData {
    pub fn from_series(series: &SeriesData, format: TooltipFormat) -> Self {
        Self {
            labels: series.labels.clone(),
            values: series.values.clone(),
            colors: None,
            tooltips: tooltip::labels(&series.values, format),
        }
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.values.is_empty()
    }
}

/// Fixed visual configuration of a chart plus its current data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub dataset_label: Option<String>,
    pub style: ChartStyle,
    pub legend: Legend,
    pub tooltip: TooltipFormat,
    /// Render y-axis ticks as currency
    pub currency_axis: bool,
    pub data: ChartData,
}
