mod app;
mod diary_dialog;
mod mood_dialog;
pub mod theme;
mod views;

pub use app::MoodCalendarApp;
