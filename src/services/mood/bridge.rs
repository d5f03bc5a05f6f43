use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;

use super::MoodService;
use crate::models::mood::MoodEntry;
use crate::services::database::Database;

/// Durable sink for mood entries. Called from a worker thread.
#[cfg_attr(test, mockall::automock)]
pub trait MoodWriter: Send + Sync {
    fn write(&self, entry: &MoodEntry) -> Result<()>;
}

/// Writes entries to the SQLite file at `db_path`, opening a fresh
/// connection per write so the UI thread's connection is never shared.
pub struct SqliteMoodWriter {
    db_path: String,
}

impl SqliteMoodWriter {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl MoodWriter for SqliteMoodWriter {
    fn write(&self, entry: &MoodEntry) -> Result<()> {
        let db = Database::new(&self.db_path)?;
        MoodService::new(db.connection()).upsert(entry)
    }
}

/// Result of one background write, as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved { date: NaiveDate },
    Failed { date: NaiveDate, error: String },
}

impl PersistOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            PersistOutcome::Saved { date } | PersistOutcome::Failed { date, .. } => *date,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PersistOutcome::Failed { .. })
    }
}

struct Completion {
    generation: u64,
    outcome: PersistOutcome,
}

struct WriteJob {
    generation: u64,
    entry: MoodEntry,
}

/// Fire-and-forget persistence of optimistic store updates.
///
/// Writes are queued to a single worker thread that applies them in dispatch
/// order, so the last save for a day is also the last one to reach the
/// database. Results come back over a channel that the UI drains once per
/// frame with [`PersistenceBridge::poll`]. Writes are tagged with the
/// generation current at dispatch time; after
/// [`PersistenceBridge::invalidate`] any late completions from an older
/// generation are dropped instead of being applied to newer state.
pub struct PersistenceBridge {
    jobs: Sender<WriteJob>,
    generation: u64,
    in_flight: usize,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl PersistenceBridge {
    pub fn new(writer: Arc<dyn MoodWriter>) -> Self {
        let (tx, rx) = mpsc::channel();
        let (jobs, job_rx) = mpsc::channel::<WriteJob>();
        let results = tx.clone();

        // Runs until the bridge, and with it the job sender, is dropped.
        thread::spawn(move || {
            for job in job_rx {
                let outcome = write_entry(writer.as_ref(), &job.entry);
                if results
                    .send(Completion {
                        generation: job.generation,
                        outcome,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            jobs,
            generation: 0,
            in_flight: 0,
            tx,
            rx,
        }
    }

    /// Bridge backed by the SQLite file the given database was opened from.
    pub fn for_database(database: &Database) -> Self {
        Self::new(Arc::new(SqliteMoodWriter::new(database.path())))
    }

    /// Queues `entry` for writing and returns immediately.
    pub fn dispatch(&mut self, entry: MoodEntry) {
        let generation = self.generation;
        self.in_flight += 1;

        if let Err(mpsc::SendError(job)) = self.jobs.send(WriteJob { generation, entry }) {
            let date = job.entry.date;
            log::error!("Mood writer stopped; could not persist entry for {}", date);
            let _ = self.tx.send(Completion {
                generation,
                outcome: PersistOutcome::Failed {
                    date,
                    error: "mood writer is not running".to_string(),
                },
            });
        }
    }

    /// Drains finished writes. Completions from an invalidated generation are
    /// discarded.
    pub fn poll(&mut self) -> Vec<PersistOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            self.accept(completion, &mut outcomes);
        }
        outcomes
    }

    /// Blocks until every dispatched write has reported or `timeout` elapses.
    /// Used on shutdown so pending saves get a chance to land.
    pub fn wait_idle(&mut self, timeout: Duration) -> Vec<PersistOutcome> {
        let deadline = Instant::now() + timeout;
        let mut outcomes = Vec::new();

        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => self.accept(completion, &mut outcomes),
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "Gave up waiting for {} pending mood write(s)",
                        self.in_flight
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        outcomes
    }

    /// Marks every write dispatched so far as stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn accept(&mut self, completion: Completion, outcomes: &mut Vec<PersistOutcome>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if completion.generation != self.generation {
            log::debug!(
                "Dropping stale persistence result for {} (generation {} < {})",
                completion.outcome.date(),
                completion.generation,
                self.generation
            );
            return;
        }
        outcomes.push(completion.outcome);
    }
}

fn write_entry(writer: &dyn MoodWriter, entry: &MoodEntry) -> PersistOutcome {
    let date = entry.date;
    match writer.write(entry) {
        Ok(()) => PersistOutcome::Saved { date },
        Err(err) => {
            log::error!("Failed to persist mood entry for {}: {:#}", date, err);
            PersistOutcome::Failed {
                date,
                error: format!("{:#}", err),
            }
        }
    }
}
