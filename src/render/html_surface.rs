use serde_json::{json, Value};

use crate::charts::{ChartConfig, ChartData, ChartKind};
use crate::traits::chart_surface::{ChartHandle, ChartSurface};

#[derive(Debug, Clone)]
struct SurfaceChart {
    target: String,
    config: ChartConfig,
    redraws: usize,
}

/// Chart surface that keeps every chart in memory and emits Chart.js setup
/// scripts for a static page.
#[derive(Debug, Clone, Default)]
pub struct HtmlChartSurface {
    charts: Vec<SurfaceChart>,
}

impl HtmlChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn handles(&self) -> impl Iterator<Item = ChartHandle> + '_ {
        (0..self.charts.len() as u64).map(ChartHandle::new)
    }

    pub fn target_of(&self, handle: ChartHandle) -> Option<&str> {
        self.get(handle).map(|c| c.target.as_str())
    }

    /// How many times a chart's data was replaced since creation.
    pub fn redraws(&self, handle: ChartHandle) -> usize {
        self.get(handle).map(|c| c.redraws).unwrap_or(0)
    }

    fn get(&self, handle: ChartHandle) -> Option<&SurfaceChart> {
        usize::try_from(handle.id())
            .ok()
            .and_then(|i| self.charts.get(i))
    }

    /// One `new Chart(...)` statement per chart.
    pub fn render_scripts(&self) -> String {
        self.charts
            .iter()
            .map(|chart| {
                let config = chart_js_config(&chart.config);
                // Keep "</script>" out of the inline script.
                let config = config.to_string().replace("</", "<\\/");
                format!(
                    "new Chart(document.getElementById({}), applyTooltips({}));",
                    Value::String(chart.target.clone()),
                    config
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ChartSurface for HtmlChartSurface {
    fn create_chart(&mut self, target: &str, config: ChartConfig) -> ChartHandle {
        let handle = ChartHandle::new(self.charts.len() as u64);
        self.charts.push(SurfaceChart {
            target: target.to_string(),
            config,
            redraws: 0,
        });
        handle
    }

    fn replace_data(&mut self, handle: ChartHandle, data: ChartData) -> bool {
        let Some(chart) = usize::try_from(handle.id())
            .ok()
            .and_then(|i| self.charts.get_mut(i))
        else {
            return false;
        };
        chart.config.data = data;
        chart.redraws += 1;
        true
    }

    fn chart(&self, handle: ChartHandle) -> Option<&ChartConfig> {
        self.get(handle).map(|c| &c.config)
    }
}

fn chart_js_config(config: &ChartConfig) -> Value {
    let kind = match config.kind {
        ChartKind::Line => "line",
        ChartKind::Bar => "bar",
        ChartKind::Doughnut => "doughnut",
    };
    let style = &config.style;
    let data = &config.data;

    let background: Value = match &data.colors {
        Some(colors) => json!(colors),
        None if style.background_colors.len() == 1 => json!(style.background_colors[0]),
        None => json!(style.background_colors),
    };

    let mut dataset = json!({
        "data": data.values,
        "backgroundColor": background,
        "borderWidth": style.border_width,
        "fill": style.fill,
    });
    if let Some(label) = &config.dataset_label {
        dataset["label"] = json!(label);
    }
    if let Some(color) = &style.border_color {
        dataset["borderColor"] = json!(color);
    }
    if let Some(tension) = style.tension {
        dataset["tension"] = json!(tension);
    }
    if let Some(radius) = style.border_radius {
        dataset["borderRadius"] = json!(radius);
    }

    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": {
                "display": config.legend.display,
                "position": config.legend.position,
            },
        },
        "tooltipText": data.tooltips,
    });
    if let Some(cutout) = &style.cutout {
        options["cutout"] = json!(cutout);
    }
    if config.currency_axis {
        options["scales"] = json!({
            "x": { "grid": { "display": false } },
            "y": { "currency": true },
        });
    }

    json!({
        "type": kind,
        "data": {
            "labels": data.labels,
            "datasets": [dataset],
        },
        "options": options,
    })
}
