use crate::utils::format::format_usd;

use super::config::TooltipFormat;

/// `round(value / total * 100)`, or 0 when the total is zero or not finite.
pub fn share_percent(value: f64, total: f64) -> i64 {
    if total == 0.0 || !total.is_finite() || !value.is_finite() {
        return 0;
    }
    // Half rounds up, as chart tooltips always have.
    (value / total * 100.0 + 0.5).floor() as i64
}

pub fn share_percentages(values: &[f64]) -> Vec<i64> {
    let total: f64 = values.iter().sum();
    values.iter().map(|v| share_percent(*v, total)).collect()
}

pub fn currency_share_label(value: f64, total: f64) -> String {
    format!("{} ({}%)", format_usd(value), share_percent(value, total))
}

/// Tooltip text for every point of a dataset.
pub fn labels(values: &[f64], format: TooltipFormat) -> Vec<String> {
    match format {
        TooltipFormat::Currency => values.iter().map(|v| format_usd(*v)).collect(),
        TooltipFormat::CurrencyWithShare => {
            let total: f64 = values.iter().sum();
            values
                .iter()
                .map(|v| currency_share_label(*v, total))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_rounded_percentages_of_total() {
        assert_eq!(share_percentages(&[1.0, 1.0, 1.0]), vec![33, 33, 33]);
        assert_eq!(share_percentages(&[1.0, 3.0]), vec![25, 75]);
        assert_eq!(share_percentages(&[1.0, 7.0]), vec![13, 88]);
        assert_eq!(share_percentages(&[2.5]), vec![100]);
    }

    #[test]
    fn zero_total_never_produces_nan() {
        assert_eq!(share_percentages(&[0.0, 0.0]), vec![0, 0]);
        let labels = labels(&[0.0, 0.0], TooltipFormat::CurrencyWithShare);
        assert_eq!(labels, vec!["$0.00 (0%)", "$0.00 (0%)"]);
        for label in labels {
            assert!(!label.contains("NaN") && !label.contains("undefined"));
        }
    }

    #[test]
    fn empty_dataset_has_no_labels() {
        assert!(labels(&[], TooltipFormat::CurrencyWithShare).is_empty());
        assert!(share_percentages(&[]).is_empty());
    }

    #[test]
    fn currency_tooltips() {
        assert_eq!(
            labels(&[1234.5, 0.25], TooltipFormat::Currency),
            vec!["$1,234.50", "$0.25"]
        );
    }
}
