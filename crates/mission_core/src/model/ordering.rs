//! Display ordering helpers.
//!
//! # Responsibility
//! - Rank incomplete, soon-due items before complete or undated ones.
//! - Produce index permutations so stored list order is left untouched.
//!
//! # Invariants
//! - Only strict `YYYY-MM-DD` dates participate in ordering; anything else
//!   sorts as if no due date were set.
//! - Ties are broken by original insertion index, keeping sorts stable.

use crate::model::entity::{Mission, Task};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Day distance used for absent or unparseable due dates.
pub const NO_DUE_DATE_DAYS: i64 = 99_999;

static STRICT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Sort key tuple: `(completed, days_until_due, insertion_index)`.
pub type SortKey = (u8, i64, usize);

/// Parses a strict `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored. Returns `None` for empty input, other
/// layouts, or impossible calendar dates.
pub fn parse_due_date(text: Option<&str>) -> Option<NaiveDate> {
    let trimmed = text?.trim();
    if !STRICT_DATE_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Days from `today` until `due`; negative when overdue.
pub fn days_until_due(due: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match due {
        Some(date) => (date - today).num_days(),
        None => NO_DUE_DATE_DAYS,
    }
}

pub fn mission_sort_key(mission: &Mission, index: usize, today: NaiveDate) -> SortKey {
    let completed = u8::from(mission.is_complete());
    let days = days_until_due(parse_due_date(mission.due_date.as_deref()), today);
    (completed, days, index)
}

pub fn task_sort_key(task: &Task, index: usize, today: NaiveDate) -> SortKey {
    let done = u8::from(task.done);
    let days = days_until_due(parse_due_date(task.due_date.as_deref()), today);
    (done, days, index)
}

/// Returns mission indices in display order.
pub fn display_order_missions(missions: &[Mission], today: NaiveDate) -> Vec<usize> {
    let mut keys: Vec<SortKey> = missions
        .iter()
        .enumerate()
        .map(|(index, mission)| mission_sort_key(mission, index, today))
        .collect();
    keys.sort_unstable();
    keys.into_iter().map(|(_, _, index)| index).collect()
}

/// Returns task indices in display order.
pub fn display_order_tasks(tasks: &[Task], today: NaiveDate) -> Vec<usize> {
    let mut keys: Vec<SortKey> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| task_sort_key(task, index, today))
        .collect();
    keys.sort_unstable();
    keys.into_iter().map(|(_, _, index)| index).collect()
}
