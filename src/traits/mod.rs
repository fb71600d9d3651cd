//! Seams between the dashboard and its collaborators

pub mod chart_surface;
pub mod data_provider;
pub mod session_store;
pub mod view;
pub mod wallet_provider;

// Re-export for convenience
pub use chart_surface::{ChartHandle, ChartSurface};
pub use data_provider::{DashboardDataProvider, FeePeriod};
pub use session_store::SessionStore;
pub use view::DashboardView;
pub use wallet_provider::WalletProvider;
