use serde::{Deserialize, Serialize};

use super::lenient;

/// A token balance held by the wallet on one network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBalance {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub network: Option<String>,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub balance: f64,
    #[serde(deserialize_with = "lenient::optional_u8")]
    pub decimals: Option<u8>,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::f64_or_zero")]
    pub price_change_24h: f64,
    #[serde(alias = "usdValue", deserialize_with = "lenient::f64_or_zero")]
    pub value: f64,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub icon: Option<String>,
}

impl TokenBalance {
    /// Amount in whole tokens. A balance sent with `decimals` is a raw integer amount.
    pub fn ui_amount(&self) -> f64 {
        match self.decimals {
            Some(decimals) => self.balance / 10f64.powi(i32::from(decimals)),
            None => self.balance,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}
