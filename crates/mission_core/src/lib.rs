//! Core domain logic for Mission Manager.
//! This crate is the single source of truth for hierarchy invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_with_config, logging_status};
pub use model::entity::{
    count_incomplete_missions, mission_progress, Genre, GenreId, Mission, MissionId, Task, TaskId,
};
pub use model::ordering::{
    days_until_due, display_order_missions, display_order_tasks, mission_sort_key,
    parse_due_date, task_sort_key, NO_DUE_DATE_DAYS,
};
pub use repo::genre_store::{GenreStore, StorageError, StorageResult};
pub use repo::json_store::JsonGenreStore;
pub use repo::memory_store::MemoryGenreStore;
pub use service::mission_service::{MissionService, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
