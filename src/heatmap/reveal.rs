//! Reveal order for populated cells.
//!
//! Entries animate in a per-session pseudo-random order rather than by
//! date. The order is a sort by `hash("{seed}-{date}")`, so it is stable for
//! a given seed.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::hash::hash_seed;
use crate::utils::date::date_key;

pub const MIN_STEP_MS: u32 = 8;
pub const MAX_STEP_MS: u32 = 60;
pub const DEFAULT_WINDOW_MS: u32 = 1400;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSchedule {
    order: Vec<NaiveDate>,
    delays: HashMap<NaiveDate, u32>,
    step_ms: u32,
    window_ms: u32,
}

impl RevealSchedule {
    /// Orders `dates` by seeded hash and spaces them `step` apart, where the
    /// step spreads them over `window_ms` within [8, 60] ms. No delay exceeds
    /// the window.
    pub fn compute(
        session_seed: u64,
        dates: impl IntoIterator<Item = NaiveDate>,
        window_ms: u32,
    ) -> Self {
        let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();
        if unique.is_empty() {
            return Self {
                window_ms,
                ..Self::default()
            };
        }

        let mut keyed: Vec<(u32, NaiveDate)> = unique
            .into_iter()
            .map(|date| {
                let key = hash_seed(&format!("{}-{}", session_seed, date_key(date)));
                (key, date)
            })
            .collect();
        keyed.sort_unstable();

        let count = keyed.len();
        let raw_step = if count <= 1 {
            0
        } else {
            (f64::from(window_ms) / (count - 1) as f64).round() as u32
        };
        let step_ms = raw_step.clamp(MIN_STEP_MS, MAX_STEP_MS);

        let mut order = Vec::with_capacity(count);
        let mut delays = HashMap::with_capacity(count);
        for (index, (_, date)) in keyed.into_iter().enumerate() {
            let delay = (index as u32).saturating_mul(step_ms).min(window_ms);
            order.push(date);
            delays.insert(date, delay);
        }

        Self {
            order,
            delays,
            step_ms,
            window_ms,
        }
    }

    pub fn delay_for(&self, date: NaiveDate) -> Option<u32> {
        self.delays.get(&date).copied()
    }

    /// Dates in reveal order.
    pub fn order(&self) -> &[NaiveDate] {
        &self.order
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    pub fn max_delay(&self) -> u32 {
        self.delays.values().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn days(count: i64) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..count).map(|i| start + Duration::days(i)).collect()
    }

    #[test]
    fn test_empty_input() {
        let schedule = RevealSchedule::compute(42, Vec::new(), DEFAULT_WINDOW_MS);
        assert!(schedule.is_empty());
        assert_eq!(schedule.max_delay(), 0);
        assert_eq!(schedule.step_ms(), 0);
    }

    #[test]
    fn test_single_entry_has_zero_delay() {
        let schedule = RevealSchedule::compute(42, days(1), DEFAULT_WINDOW_MS);
        assert_eq!(schedule.delay_for(days(1)[0]), Some(0));
        assert_eq!(schedule.step_ms(), MIN_STEP_MS);
    }

    #[test]
    fn test_few_entries_use_max_step() {
        // 1400 / 4 = 350 -> clamped to 60
        let schedule = RevealSchedule::compute(7, days(5), DEFAULT_WINDOW_MS);
        assert_eq!(schedule.step_ms(), MAX_STEP_MS);
        assert_eq!(schedule.max_delay(), 4 * MAX_STEP_MS);
    }

    #[test]
    fn test_many_entries_capped_by_window() {
        let schedule = RevealSchedule::compute(7, days(366), DEFAULT_WINDOW_MS);
        assert_eq!(schedule.step_ms(), MIN_STEP_MS);
        assert_eq!(schedule.max_delay(), DEFAULT_WINDOW_MS);
    }

    #[test]
    fn test_order_follows_hash_and_delays_increase() {
        let schedule = RevealSchedule::compute(99, days(40), DEFAULT_WINDOW_MS);

        let keys: Vec<u32> = schedule
            .order()
            .iter()
            .map(|d| hash_seed(&format!("99-{}", date_key(*d))))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));

        let delays: Vec<u32> = schedule
            .order()
            .iter()
            .map(|d| schedule.delay_for(*d).unwrap())
            .collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(delays[0], 0);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = RevealSchedule::compute(5, days(20), DEFAULT_WINDOW_MS);
        let b = RevealSchedule::compute(5, days(20), DEFAULT_WINDOW_MS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_dates_collapse() {
        let mut input = days(3);
        input.extend(days(3));
        assert_eq!(RevealSchedule::compute(1, input, DEFAULT_WINDOW_MS).len(), 3);
    }
}
