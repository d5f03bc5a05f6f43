//! Year-at-a-glance emotion heatmap.
//!
//! Everything here is independent of the GUI toolkit: the week/weekday
//! layout for a year, the stable hash behind cell jitter and reveal order,
//! the per-cell view data a renderer needs, and the hover/edit state machine.

pub mod grid;
pub mod hash;
pub mod interaction;
pub mod layout;
pub mod reveal;
pub mod tooltip;

pub use grid::{CellView, GridOptions, HeatmapGrid};
pub use hash::{hash_seed, jitter_for, Jitter};
pub use interaction::{Interaction, MoodDraft};
pub use layout::{build_week_columns, CalendarCell, WeekColumn};
pub use reveal::RevealSchedule;
pub use tooltip::{ScreenPoint, TooltipContent, TooltipScheduler};
