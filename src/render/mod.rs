//! Dashboard views and chart surfaces

pub mod composite;
pub mod console;
pub mod html;
pub mod html_surface;

// Re-export for convenience
pub use composite::CompositeView;
pub use console::ConsoleView;
pub use html::HtmlView;
pub use html_surface::HtmlChartSurface;
