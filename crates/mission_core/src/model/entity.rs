//! Hierarchy entities and derived progress.
//!
//! # Responsibility
//! - Define `Genre`, `Mission`, and `Task` records with their wire shape.
//! - Keep identity separate from content so duplicate-content entries stay
//!   distinguishable.
//!
//! # Invariants
//! - Handles are assigned at construction/decode time and never serialized.
//! - `PartialEq` compares content only; use `id()` for identity.
//! - `mission_progress` is always within `[0.0, 1.0]`.

use serde::Serialize;
use uuid::Uuid;

/// Stable in-process handle for a genre.
pub type GenreId = Uuid;
/// Stable in-process handle for a mission.
pub type MissionId = Uuid;
/// Stable in-process handle for a task.
pub type TaskId = Uuid;

/// Leaf work item owned by exactly one mission.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    #[serde(skip)]
    id: TaskId,
    pub name: String,
    pub done: bool,
    /// `YYYY-MM-DD` by convention; stored verbatim.
    pub due_date: Option<String>,
    /// `YYYY-MM-DD HH:MM`, set while `done` is true.
    pub completed_at: Option<String>,
}

/// Ordered task container owned by exactly one genre.
#[derive(Debug, Clone, Serialize)]
pub struct Mission {
    #[serde(skip)]
    id: MissionId,
    pub name: String,
    pub summary: Option<String>,
    pub due_date: Option<String>,
    /// Derived from task state by the service completion re-sync.
    pub completed_at: Option<String>,
    pub tasks: Vec<Task>,
}

/// Top-level category holding an ordered mission list.
#[derive(Debug, Clone, Serialize)]
pub struct Genre {
    #[serde(skip)]
    id: GenreId,
    pub name: String,
    pub summary: Option<String>,
    pub missions: Vec<Mission>,
}

impl Task {
    /// Creates a not-done task with no dates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            done: false,
            due_date: None,
            completed_at: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl Mission {
    /// Creates an empty mission with all optional fields unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            summary: None,
            due_date: None,
            completed_at: None,
            tasks: Vec::new(),
        }
    }

    pub fn id(&self) -> MissionId {
        self.id
    }

    /// Fraction of done tasks, see [`mission_progress`].
    pub fn progress(&self) -> f64 {
        mission_progress(self)
    }

    /// Returns whether every task is done and at least one task exists.
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Returns the position of `task` in this mission by handle.
    pub fn task_index(&self, task: TaskId) -> Option<usize> {
        self.tasks.iter().position(|item| item.id == task)
    }
}

impl Genre {
    /// Creates an empty genre.
    ///
    /// An empty `summary` is normalized to `None`.
    pub fn new(name: impl Into<String>, summary: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            summary: summary.filter(|value| !value.is_empty()).map(str::to_string),
            missions: Vec::new(),
        }
    }

    pub fn id(&self) -> GenreId {
        self.id
    }

    /// Returns the position of `mission` in this genre by handle.
    pub fn mission_index(&self, mission: MissionId) -> Option<usize> {
        self.missions.iter().position(|item| item.id == mission)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.done == other.done
            && self.due_date == other.due_date
            && self.completed_at == other.completed_at
    }
}

impl PartialEq for Mission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.summary == other.summary
            && self.due_date == other.due_date
            && self.completed_at == other.completed_at
            && self.tasks == other.tasks
    }
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.summary == other.summary && self.missions == other.missions
    }
}

/// Returns done/total for the mission's tasks, or `0.0` when it has none.
pub fn mission_progress(mission: &Mission) -> f64 {
    if mission.tasks.is_empty() {
        return 0.0;
    }
    let done = mission.tasks.iter().filter(|task| task.done).count();
    done as f64 / mission.tasks.len() as f64
}

/// Counts missions in `genre` whose progress is below `1.0`.
pub fn count_incomplete_missions(genre: &Genre) -> usize {
    genre
        .missions
        .iter()
        .filter(|mission| !mission.is_complete())
        .count()
}
