use thiserror::Error;

/// Errors surfaced by the dashboard. None of them is fatal to a session.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid wallet address. Please provide a valid Ethereum address.")]
    InvalidAddress,

    #[error("{message}")]
    NetworkRequestFailed {
        message: String,
        status: Option<u16>,
    },

    #[error("No wallet extension detected. Please install a browser wallet to connect.")]
    WalletProviderUnavailable,

    #[error("You rejected the connection request. Please connect your wallet to use this feature.")]
    WalletAuthorizationDeclined,

    #[error("{0} integration is coming soon!")]
    FeatureUnavailable(&'static str),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl DashboardError {
    pub fn request_failed(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::NetworkRequestFailed {
            message: message.into(),
            status,
        }
    }

    /// HTTP status of a failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NetworkRequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        Self::NetworkRequestFailed {
            message: format!("Request failed: {}", err),
            status,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
