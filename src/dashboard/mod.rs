//! Dashboard session, controller and view models

pub mod controller;
pub mod session;
pub mod view_model;

// Re-export for convenience
pub use controller::{address_from_url, DashboardController, DEMO_ADDRESS};
pub use session::DashboardSession;
pub use view_model::{DashboardViewModel, MetricCard, MetricId, Notice, NoticeLevel, Section};
