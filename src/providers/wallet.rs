use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::traits::wallet_provider::WalletProvider;

/// Wallet backed by a configured account, standing in for a browser extension.
///
/// Without an account the provider reports itself as not installed.
#[derive(Debug, Clone, Default)]
pub struct LocalWalletProvider {
    account: Option<String>,
    declines: bool,
}

impl LocalWalletProvider {
    pub fn new(account: Option<String>) -> Self {
        let account = account
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Self {
            account,
            declines: false,
        }
    }

    /// Provider whose authorization prompt is always rejected.
    pub fn declining(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            declines: true,
        }
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    fn name(&self) -> &str {
        "Local wallet"
    }

    fn is_available(&self) -> bool {
        self.account.is_some()
    }

    fn selected_address(&self) -> Option<String> {
        self.account.clone()
    }

    async fn request_accounts(&self) -> Result<Vec<String>> {
        let Some(account) = &self.account else {
            return Err(DashboardError::WalletProviderUnavailable);
        };
        if self.declines {
            info!("{} authorization declined", self.name());
            return Err(DashboardError::WalletAuthorizationDeclined);
        }
        debug!("{} authorized {}", self.name(), account);
        Ok(vec![account.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_account_means_unavailable() {
        let wallet = LocalWalletProvider::new(Some("   ".into()));
        assert!(!wallet.is_available());
        assert!(wallet.selected_address().is_none());
        let err = wallet.request_accounts().await.unwrap_err();
        assert!(matches!(err, DashboardError::WalletProviderUnavailable));
    }

    #[tokio::test]
    async fn configured_account_is_authorized() {
        let wallet = LocalWalletProvider::new(Some(" 0xabc ".into()));
        assert_eq!(wallet.request_accounts().await.unwrap(), vec!["0xabc"]);
    }

    #[tokio::test]
    async fn declining_wallet_rejects_prompt() {
        let wallet = LocalWalletProvider::declining("0xabc");
        assert!(wallet.is_available());
        let err = wallet.request_accounts().await.unwrap_err();
        assert!(matches!(err, DashboardError::WalletAuthorizationDeclined));
    }
}
