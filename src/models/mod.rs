//! Data models for the dashboard API

pub mod address;
pub mod charts;
mod lenient;
pub mod network;
pub mod portfolio;
pub mod token;

// Re-export for convenience
pub use address::{is_valid_address, WalletAddress};
pub use charts::{Breakdown, ChartBundle, SeriesData};
pub use network::{Network, NetworkSet};
pub use portfolio::{
    BalancesReport, DashboardPayload, DefiPosition, FeesReport, Overview, PositionAsset,
    PositionsReport, Transaction, TransactionsReport,
};
pub use token::TokenBalance;
