//! Wallet Dashboard Library
//!
//! Fetches a wallet's portfolio overview, token balances, DeFi positions,
//! transactions and fee breakdowns from the dashboard API and renders them
//! as formatted sections and charts.

// Public modules - these are the API surface
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod providers;
pub mod render;
pub mod traits;
pub mod utils;

// Re-export commonly used items for easier access
pub use config::DashboardConfig;
pub use dashboard::{DashboardController, DashboardSession, DashboardViewModel, Notice};
pub use error::{DashboardError, Result};
pub use models::{is_valid_address, DashboardPayload, NetworkSet, WalletAddress};
pub use providers::{FileStore, HttpDataProvider, LocalWalletProvider, MemoryStore};
pub use render::{CompositeView, ConsoleView, HtmlChartSurface, HtmlView};
pub use traits::{
    ChartSurface, DashboardDataProvider, DashboardView, FeePeriod, SessionStore, WalletProvider,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
