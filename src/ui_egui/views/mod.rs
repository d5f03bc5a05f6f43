pub mod header;
pub mod heatmap_view;
pub mod palette;
pub mod tooltip_overlay;

pub use heatmap_view::{CellAnimation, GridHover, HeatmapResponse, HeatmapView};
