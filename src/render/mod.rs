pub mod chart;
pub mod dispatch;
pub mod nav;
pub mod page;
pub mod specs;
pub mod surface;
pub mod table;

pub use chart::{Chart, ChartId, ChartOptions, ChartSpec, SeriesSpec};
pub use dispatch::{error_display, ErrorDisplay, RenderOutcome, Renderer};
pub use nav::NavState;
pub use page::Page;
pub use surface::{Image, Node, ObserverId, Region, Surface};
pub use table::Table;
