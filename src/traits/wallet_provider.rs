use async_trait::async_trait;

use crate::error::Result;

/// A wallet that can hand out an authorized account, such as a browser extension.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Name shown in notices
    fn name(&self) -> &str;

    /// Whether the provider is installed at all
    fn is_available(&self) -> bool;

    /// Account currently selected in the wallet, without prompting.
    fn selected_address(&self) -> Option<String>;

    /// Prompt for account access.
    ///
    /// Fails with `WalletProviderUnavailable` when the provider is absent and
    /// `WalletAuthorizationDeclined` when the user rejects the prompt.
    async fn request_accounts(&self) -> Result<Vec<String>>;
}
