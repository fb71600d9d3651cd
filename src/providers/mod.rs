//! Backends for dashboard data, wallets and persisted state

pub mod http_provider;
pub mod store;
pub mod wallet;

// Re-export for convenience
pub use http_provider::{HttpDataProvider, DEFAULT_API_URL};
pub use store::{FileStore, MemoryStore, CONNECTED_WALLET_KEY};
pub use wallet::LocalWalletProvider;
