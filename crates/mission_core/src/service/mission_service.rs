//! Genre/mission/task use-case service.
//!
//! # Responsibility
//! - Own the loaded hierarchy for the lifetime of the service.
//! - Be the only mutation surface over genres, missions, and tasks.
//! - Keep mission completion in sync with task state.
//!
//! # Invariants
//! - Preconditions are checked before any mutation; a failed check mutates
//!   nothing and saves nothing.
//! - Every successful mutation is followed by one synchronous full save.
//! - A failed save does not roll back the in-memory mutation.
//! - Boundary moves (first up, last down) are no-ops and do not save.
//! - Mission/task lookups resolve by handle, never by content.

use crate::clock::{Clock, SystemClock};
use crate::model::entity::{
    mission_progress, Genre, GenreId, Mission, MissionId, Task, TaskId,
};
use crate::repo::genre_store::{GenreStore, StorageError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from hierarchy service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Genre index is outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// Genre handle is not in the hierarchy.
    GenreNotFound(GenreId),
    /// Mission handle is not in the claimed parent.
    MissionNotFound(MissionId),
    /// Task handle is not in the claimed mission.
    TaskNotFound(TaskId),
    /// Backing store failure.
    Storage(StorageError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "genre index {index} is out of range (len {len})")
            }
            Self::GenreNotFound(id) => write!(f, "genre not found: {id}"),
            Self::MissionNotFound(id) => write!(f, "mission not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Hierarchy service facade.
pub struct MissionService<S: GenreStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    genres: Vec<Genre>,
}

impl<S: GenreStore> MissionService<S, SystemClock> {
    /// Loads the hierarchy from `store` using the local system clock.
    pub fn new(store: S) -> ServiceResult<Self> {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: GenreStore, C: Clock> MissionService<S, C> {
    /// Loads the hierarchy from `store` using `clock` for completion stamps.
    pub fn with_clock(store: S, clock: C) -> ServiceResult<Self> {
        let genres = store.load_genres()?;
        info!(
            "event=service_init module=service status=ok genres={}",
            genres.len()
        );
        Ok(Self {
            store,
            clock,
            genres,
        })
    }

    /// Live hierarchy, in stored order.
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn list_genres(&self) -> &[Genre] {
        self.genres()
    }

    pub fn genre(&self, genre: GenreId) -> Option<&Genre> {
        self.genres.iter().find(|item| item.id() == genre)
    }

    /// Finds a mission anywhere in the hierarchy.
    pub fn mission(&self, mission: MissionId) -> Option<&Mission> {
        self.genres
            .iter()
            .flat_map(|genre| genre.missions.iter())
            .find(|item| item.id() == mission)
    }

    pub fn task(&self, mission: MissionId, task: TaskId) -> Option<&Task> {
        self.mission(mission)?
            .tasks
            .iter()
            .find(|item| item.id() == task)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // Genres

    /// Appends a new genre and returns its handle.
    pub fn add_genre(
        &mut self,
        name: impl Into<String>,
        summary: Option<&str>,
    ) -> ServiceResult<GenreId> {
        let genre = Genre::new(name, summary);
        let id = genre.id();
        self.genres.push(genre);
        self.save("add_genre")?;
        Ok(id)
    }

    pub fn rename_genre(&mut self, index: usize, name: impl Into<String>) -> ServiceResult<()> {
        self.check_genre_index(index)?;
        self.genres[index].name = name.into();
        self.save("rename_genre")
    }

    /// Sets or clears (`None` or empty) the genre summary.
    pub fn set_genre_summary(&mut self, index: usize, summary: Option<&str>) -> ServiceResult<()> {
        self.check_genre_index(index)?;
        self.genres[index].summary = non_empty(summary);
        self.save("set_genre_summary")
    }

    /// Removes the genre at `index` together with its missions.
    pub fn delete_genre(&mut self, index: usize) -> ServiceResult<()> {
        self.check_genre_index(index)?;
        self.genres.remove(index);
        self.save("delete_genre")
    }

    pub fn move_genre_up(&mut self, index: usize) -> ServiceResult<()> {
        self.check_genre_index(index)?;
        if index == 0 {
            return Ok(());
        }
        self.genres.swap(index - 1, index);
        self.save("move_genre_up")
    }

    pub fn move_genre_down(&mut self, index: usize) -> ServiceResult<()> {
        self.check_genre_index(index)?;
        if index + 1 >= self.genres.len() {
            return Ok(());
        }
        self.genres.swap(index, index + 1);
        self.save("move_genre_down")
    }

    // Missions

    /// Appends a mission to `genre`.
    ///
    /// `summary` and `due_date` are applied only when non-empty.
    pub fn add_mission(
        &mut self,
        genre: GenreId,
        name: impl Into<String>,
        summary: Option<&str>,
        due_date: Option<&str>,
    ) -> ServiceResult<MissionId> {
        let mut mission = Mission::new(name);
        mission.summary = non_empty(summary);
        mission.due_date = non_empty(due_date);
        let id = mission.id();
        self.genre_mut(genre)?.missions.push(mission);
        self.save("add_mission")?;
        Ok(id)
    }

    /// Returns the position of `mission` within `genre`.
    pub fn find_mission_index(&self, genre: GenreId, mission: MissionId) -> ServiceResult<usize> {
        self.genre(genre)
            .ok_or(ServiceError::GenreNotFound(genre))?
            .mission_index(mission)
            .ok_or(ServiceError::MissionNotFound(mission))
    }

    pub fn rename_mission(
        &mut self,
        genre: GenreId,
        mission: MissionId,
        name: impl Into<String>,
    ) -> ServiceResult<()> {
        self.mission_in_genre_mut(genre, mission)?.name = name.into();
        self.save("rename_mission")
    }

    /// Sets or clears (`None` or empty) the mission due date.
    pub fn set_mission_due(
        &mut self,
        genre: GenreId,
        mission: MissionId,
        due_date: Option<&str>,
    ) -> ServiceResult<()> {
        self.mission_in_genre_mut(genre, mission)?.due_date = non_empty(due_date);
        self.save("set_mission_due")
    }

    pub fn set_mission_summary(
        &mut self,
        genre: GenreId,
        mission: MissionId,
        summary: Option<&str>,
    ) -> ServiceResult<()> {
        self.mission_in_genre_mut(genre, mission)?.summary = non_empty(summary);
        self.save("set_mission_summary")
    }

    pub fn delete_mission(&mut self, genre: GenreId, mission: MissionId) -> ServiceResult<()> {
        let index = self.find_mission_index(genre, mission)?;
        self.genre_mut(genre)?.missions.remove(index);
        self.save("delete_mission")
    }

    pub fn move_mission_up(&mut self, genre: GenreId, mission: MissionId) -> ServiceResult<()> {
        let index = self.find_mission_index(genre, mission)?;
        if index == 0 {
            return Ok(());
        }
        self.genre_mut(genre)?.missions.swap(index - 1, index);
        self.save("move_mission_up")
    }

    pub fn move_mission_down(&mut self, genre: GenreId, mission: MissionId) -> ServiceResult<()> {
        let index = self.find_mission_index(genre, mission)?;
        let missions = &mut self.genre_mut(genre)?.missions;
        if index + 1 >= missions.len() {
            return Ok(());
        }
        missions.swap(index, index + 1);
        self.save("move_mission_down")
    }

    // Tasks

    /// Appends a task to `mission` and re-syncs mission completion.
    pub fn add_task(
        &mut self,
        mission: MissionId,
        name: impl Into<String>,
        due_date: Option<&str>,
    ) -> ServiceResult<TaskId> {
        let mut task = Task::new(name);
        task.due_date = non_empty(due_date);
        let id = task.id();
        let stamp = self.clock.timestamp();
        let target = self.mission_mut(mission)?;
        target.tasks.push(task);
        sync_mission_completion(target, stamp);
        self.save("add_task")?;
        Ok(id)
    }

    /// Returns the position of `task` within `mission`.
    pub fn find_task_index(&self, mission: MissionId, task: TaskId) -> ServiceResult<usize> {
        self.mission(mission)
            .ok_or(ServiceError::MissionNotFound(mission))?
            .task_index(task)
            .ok_or(ServiceError::TaskNotFound(task))
    }

    pub fn rename_task(
        &mut self,
        mission: MissionId,
        task: TaskId,
        name: impl Into<String>,
    ) -> ServiceResult<()> {
        self.task_mut(mission, task)?.name = name.into();
        self.save("rename_task")
    }

    /// Sets or clears (`None` or empty) the task due date.
    pub fn set_task_due(
        &mut self,
        mission: MissionId,
        task: TaskId,
        due_date: Option<&str>,
    ) -> ServiceResult<()> {
        self.task_mut(mission, task)?.due_date = non_empty(due_date);
        self.save("set_task_due")
    }

    /// Removes `task` from `mission` and re-syncs mission completion.
    pub fn delete_task(&mut self, mission: MissionId, task: TaskId) -> ServiceResult<()> {
        let index = self.find_task_index(mission, task)?;
        let stamp = self.clock.timestamp();
        let target = self.mission_mut(mission)?;
        target.tasks.remove(index);
        sync_mission_completion(target, stamp);
        self.save("delete_task")
    }

    pub fn move_task_up(&mut self, mission: MissionId, task: TaskId) -> ServiceResult<()> {
        let index = self.find_task_index(mission, task)?;
        if index == 0 {
            return Ok(());
        }
        self.mission_mut(mission)?.tasks.swap(index - 1, index);
        self.save("move_task_up")
    }

    pub fn move_task_down(&mut self, mission: MissionId, task: TaskId) -> ServiceResult<()> {
        let index = self.find_task_index(mission, task)?;
        let tasks = &mut self.mission_mut(mission)?.tasks;
        if index + 1 >= tasks.len() {
            return Ok(());
        }
        tasks.swap(index, index + 1);
        self.save("move_task_down")
    }

    /// Marks `task` done or not done and re-syncs mission completion.
    ///
    /// Checking stamps `completed_at` with the current time (also when the
    /// task was already done); unchecking clears it.
    pub fn toggle_task_done(
        &mut self,
        mission: MissionId,
        task: TaskId,
        checked: bool,
    ) -> ServiceResult<()> {
        let index = self.find_task_index(mission, task)?;
        let stamp = self.clock.timestamp();
        let target = self.mission_mut(mission)?;
        let item = &mut target.tasks[index];
        item.done = checked;
        item.completed_at = checked.then(|| stamp.clone());
        sync_mission_completion(target, stamp);
        self.save("toggle_task_done")
    }

    fn check_genre_index(&self, index: usize) -> ServiceResult<()> {
        let len = self.genres.len();
        if index >= len {
            return Err(ServiceError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    fn genre_mut(&mut self, genre: GenreId) -> ServiceResult<&mut Genre> {
        self.genres
            .iter_mut()
            .find(|item| item.id() == genre)
            .ok_or(ServiceError::GenreNotFound(genre))
    }

    fn mission_in_genre_mut(
        &mut self,
        genre: GenreId,
        mission: MissionId,
    ) -> ServiceResult<&mut Mission> {
        self.genre_mut(genre)?
            .missions
            .iter_mut()
            .find(|item| item.id() == mission)
            .ok_or(ServiceError::MissionNotFound(mission))
    }

    fn mission_mut(&mut self, mission: MissionId) -> ServiceResult<&mut Mission> {
        self.genres
            .iter_mut()
            .flat_map(|genre| genre.missions.iter_mut())
            .find(|item| item.id() == mission)
            .ok_or(ServiceError::MissionNotFound(mission))
    }

    fn task_mut(&mut self, mission: MissionId, task: TaskId) -> ServiceResult<&mut Task> {
        self.mission_mut(mission)?
            .tasks
            .iter_mut()
            .find(|item| item.id() == task)
            .ok_or(ServiceError::TaskNotFound(task))
    }

    fn save(&self, operation: &'static str) -> ServiceResult<()> {
        debug!(
            "event=service_mutation module=service op={} genres={}",
            operation,
            self.genres.len()
        );
        self.store.save_genres(&self.genres)?;
        Ok(())
    }
}

/// Stamps `completed_at` when every task is done, clears it otherwise.
fn sync_mission_completion(mission: &mut Mission, stamp: String) {
    mission.completed_at = if mission_progress(mission) >= 1.0 {
        Some(stamp)
    } else {
        None
    };
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(str::to_string)
}
