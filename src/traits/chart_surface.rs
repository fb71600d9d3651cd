use crate::charts::{ChartConfig, ChartData};

/// Opaque reference to a chart created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The charting backend. Owns chart instances; adapters only hold handles.
pub trait ChartSurface: Send {
    /// Create a chart bound to the named target with the given configuration.
    fn create_chart(&mut self, target: &str, config: ChartConfig) -> ChartHandle;

    /// Replace labels and series of an existing chart and redraw it.
    ///
    /// Returns `false` when the handle is unknown to this surface.
    fn replace_data(&mut self, handle: ChartHandle, data: ChartData) -> bool;

    /// Current configuration (including data) of a chart.
    fn chart(&self, handle: ChartHandle) -> Option<&ChartConfig>;
}
