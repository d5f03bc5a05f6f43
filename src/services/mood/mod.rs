//! Mood tracking services.
//!
//! `MoodService` is the SQLite repository, `MoodStore` the in-memory map the
//! UI reads from, and `PersistenceBridge` carries optimistic writes from the
//! store to the database on background threads.

mod bridge;
mod repository;
mod seeds;
mod store;

pub use bridge::{MoodWriter, PersistOutcome, PersistenceBridge, SqliteMoodWriter};
pub use repository::MoodService;
pub use seeds::sample_seeds;
pub use store::MoodStore;

#[cfg(test)]
pub use bridge::MockMoodWriter;
