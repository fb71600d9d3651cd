use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern is valid"));

/// Check whether `s` is a `0x`-prefixed, 40 hex digit wallet address.
pub fn is_valid_address(s: &str) -> bool {
    ADDRESS_RE.is_match(s)
}

/// A validated 20-byte wallet address, kept in the casing it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(s: &str) -> Result<Self, DashboardError> {
        if is_valid_address(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DashboardError::InvalidAddress)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened `0x1234...abcd` form used in headers.
    pub fn short(&self) -> String {
        crate::utils::format::format_address(&self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_case_hex() {
        assert!(is_valid_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));
        assert!(is_valid_address("0x28C6c06298d514Db089934071355E5743bf21d60"));
    }

    #[test]
    fn rejects_wrong_shapes() {
        for bad in [
            "",
            "undefined",
            "0x",
            "d8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604",
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA960450",
            "0Xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            "0xg8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            " 0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
        ] {
            assert!(!is_valid_address(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_keeps_exact_input() {
        let addr = WalletAddress::parse("0x1234567890123456789012345678901234567890").unwrap();
        assert_eq!(addr.as_str(), "0x1234567890123456789012345678901234567890");
        assert_eq!(addr.short(), "0x1234...7890");
        assert!(matches!(
            WalletAddress::parse("  0x1234567890123456789012345678901234567890\n"),
            Err(DashboardError::InvalidAddress)
        ));
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(matches!(
            WalletAddress::parse("0x1234"),
            Err(DashboardError::InvalidAddress)
        ));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<WalletAddress, _> =
            serde_json::from_str("\"0x1234567890123456789012345678901234567890\"");
        assert!(ok.is_ok());
        let bad: Result<WalletAddress, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
