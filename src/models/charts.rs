use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::{self, value_to_f64};

/// Labels plus one numeric series, the shape every chart consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSeries")]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeries {
    Shaped {
        #[serde(default)]
        labels: Vec<Value>,
        #[serde(default)]
        values: Vec<Value>,
    },
    Points(Vec<RawPoint>),
}

#[derive(Deserialize)]
struct RawPoint {
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    label: Option<Value>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    value: f64,
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<RawSeries> for SeriesData {
    fn from(raw: RawSeries) -> Self {
        match raw {
            RawSeries::Shaped { labels, values } => SeriesData {
                labels: labels.iter().map(label_text).collect(),
                values: values
                    .iter()
                    .map(|v| value_to_f64(v).unwrap_or(0.0))
                    .collect(),
            },
            RawSeries::Points(points) => {
                let mut series = SeriesData::default();
                for point in points {
                    let label = point.date.or(point.label).unwrap_or(Value::Null);
                    series.labels.push(label_text(&label));
                    series.values.push(point.value);
                }
                series
            }
        }
    }
}

/// Categorical totals keyed by network or transaction type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBreakdown")]
pub struct Breakdown(pub SeriesData);

impl Breakdown {
    pub fn series(&self) -> &SeriesData {
        &self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBreakdown {
    Items(Vec<RawBreakdownItem>),
    Shaped {
        #[serde(default)]
        labels: Vec<Value>,
        #[serde(default)]
        values: Vec<Value>,
    },
}

#[derive(Deserialize)]
struct RawBreakdownItem {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    network: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::optional_string")]
    kind: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    fee: Option<Value>,
}

impl RawBreakdownItem {
    fn label(&self) -> String {
        [&self.name, &self.network, &self.kind]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_default()
    }

    // First non-zero of value, amount, fee.
    fn amount(&self) -> f64 {
        [&self.value, &self.amount, &self.fee]
            .into_iter()
            .flatten()
            .filter_map(value_to_f64)
            .find(|v| *v != 0.0)
            .unwrap_or(0.0)
    }
}

impl From<RawBreakdown> for Breakdown {
    fn from(raw: RawBreakdown) -> Self {
        match raw {
            RawBreakdown::Items(items) => Breakdown(SeriesData {
                labels: items.iter().map(RawBreakdownItem::label).collect(),
                values: items.iter().map(RawBreakdownItem::amount).collect(),
            }),
            RawBreakdown::Shaped { labels, values } => {
                Breakdown(SeriesData::from(RawSeries::Shaped { labels, values }))
            }
        }
    }
}

/// Chart section of the dashboard payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartBundle {
    pub portfolio_history: Option<SeriesData>,
    pub daily_fees: Option<SeriesData>,
    pub fees_by_network: Option<Breakdown>,
    pub fees_by_type: Option<Breakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_accepts_shaped_form() {
        let s: SeriesData =
            serde_json::from_str(r#"{"labels":["Mon","Tue"],"values":[1.5,"2"]}"#).unwrap();
        assert_eq!(s.labels, vec!["Mon", "Tue"]);
        assert_eq!(s.values, vec![1.5, 2.0]);
    }

    #[test]
    fn series_accepts_point_list() {
        let s: SeriesData = serde_json::from_str(
            r#"[{"date":"2024-01-01","value":10},{"date":"2024-01-02","value":12.5}]"#,
        )
        .unwrap();
        assert_eq!(s.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(s.total(), 22.5);
    }

    #[test]
    fn breakdown_picks_first_label_and_amount() {
        let b: Breakdown = serde_json::from_str(
            r#"[
                {"name":"Ethereum","value":12.0},
                {"network":"polygon","amount":"3.5"},
                {"type":"swap","value":0,"fee":1.25},
                {"type":"nft"}
            ]"#,
        )
        .unwrap();
        assert_eq!(b.series().labels, vec!["Ethereum", "polygon", "swap", "nft"]);
        assert_eq!(b.series().values, vec![12.0, 3.5, 1.25, 0.0]);
    }

    #[test]
    fn bundle_tolerates_missing_sections() {
        let bundle: ChartBundle =
            serde_json::from_str(r#"{"dailyFees":{"labels":[],"values":[]}}"#).unwrap();
        assert!(bundle.portfolio_history.is_none());
        assert!(bundle.daily_fees.unwrap().is_empty());
    }

    #[test]
    fn breakdown_accepts_numeric_labels() {
        let b: Breakdown =
            serde_json::from_str(r#"[{"name":7,"fee":2},{"network":"polygon","fee":1}]"#).unwrap();
        assert_eq!(b.series().labels, vec!["7", "polygon"]);
        assert_eq!(b.series().values, vec![2.0, 1.0]);
    }
}
