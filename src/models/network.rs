use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A blockchain the API can query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Network {
    Ethereum,
    Polygon,
    Bsc,
    Optimism,
    Arbitrum,
    Avalanche,
    Fantom,
    Other(String),
}

impl Network {
    pub fn id(&self) -> &str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Polygon => "polygon",
            Network::Bsc => "bsc",
            Network::Optimism => "optimism",
            Network::Arbitrum => "arbitrum",
            Network::Avalanche => "avalanche",
            Network::Fantom => "fantom",
            Network::Other(id) => id,
        }
    }
}

impl From<&str> for Network {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ethereum" | "eth" => Network::Ethereum,
            "polygon" | "matic" => Network::Polygon,
            "bsc" | "bnb" => Network::Bsc,
            "optimism" => Network::Optimism,
            "arbitrum" => Network::Arbitrum,
            "avalanche" => Network::Avalanche,
            "fantom" => Network::Fantom,
            other => Network::Other(other.to_string()),
        }
    }
}

impl From<String> for Network {
    fn from(s: String) -> Self {
        Network::from(s.as_str())
    }
}

impl From<Network> for String {
    fn from(n: Network) -> Self {
        n.id().to_string()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ordered, de-duplicated list of networks, serialized comma-joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSet(Vec<Network>);

impl NetworkSet {
    pub const DEFAULT: &'static str = "ethereum,polygon,bsc,optimism,arbitrum";

    pub fn new(networks: impl IntoIterator<Item = Network>) -> Self {
        let mut out: Vec<Network> = Vec::new();
        for n in networks {
            if !out.contains(&n) {
                out.push(n);
            }
        }
        Self(out)
    }

    pub fn networks(&self) -> &[Network] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-joined form used in query strings.
    pub fn query_value(&self) -> String {
        self.0.iter().map(Network::id).collect::<Vec<_>>().join(",")
    }
}

impl Default for NetworkSet {
    fn default() -> Self {
        Self::from(Self::DEFAULT)
    }
}

impl From<&str> for NetworkSet {
    /// Blank input yields the default set.
    fn from(s: &str) -> Self {
        let set = Self::new(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(Network::from),
        );
        if set.is_empty() {
            Self::default()
        } else {
            set
        }
    }
}

impl FromStr for NetworkSet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for NetworkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_matches_query_default() {
        assert_eq!(NetworkSet::default().query_value(), NetworkSet::DEFAULT);
        assert_eq!(NetworkSet::default().networks().len(), 5);
    }

    #[test]
    fn parse_normalizes_and_dedups() {
        let set = NetworkSet::from(" Ethereum, polygon ,ethereum,,zksync ");
        assert_eq!(set.query_value(), "ethereum,polygon,zksync");
        assert_eq!(set.networks()[2], Network::Other("zksync".into()));
    }

    #[test]
    fn blank_input_falls_back_to_default() {
        assert_eq!(NetworkSet::from("  , ").query_value(), NetworkSet::DEFAULT);
        assert_eq!(NetworkSet::from("").query_value(), NetworkSet::DEFAULT);
    }
}
