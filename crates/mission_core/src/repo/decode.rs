//! Lenient decoding of persisted genre documents.
//!
//! # Responsibility
//! - Turn an untrusted JSON document into well-formed hierarchy records.
//! - Default missing optional fields instead of rejecting legacy files.
//!
//! # Invariants
//! - Entries that are not objects or lack a string `name` are dropped.
//! - A non-array `genres` container (including `null`) is a hard error; a
//!   non-array `missions` container is a hard error unless it is `null`.
//! - A missing/non-array `tasks` container decodes as empty.
//! - Date strings are kept verbatim; no date validation happens here.

use crate::model::entity::{Genre, Mission, Task};
use crate::repo::genre_store::{StorageError, StorageResult};
use serde_json::{Map, Value};

/// Decoded hierarchy plus the number of discarded malformed entries.
#[derive(Debug)]
pub struct DecodedDocument {
    pub genres: Vec<Genre>,
    pub dropped: usize,
}

/// Parses and decodes a genre document.
///
/// `location` names the document source inside error messages.
pub fn decode_document(text: &str, location: &str) -> StorageResult<DecodedDocument> {
    let root: Value = serde_json::from_str(text).map_err(|source| StorageError::Parse {
        location: location.to_string(),
        source,
    })?;
    decode_value(&root)
}

/// Decodes an already parsed genre document.
pub fn decode_value(root: &Value) -> StorageResult<DecodedDocument> {
    let root = root.as_object().ok_or_else(|| {
        StorageError::InvalidShape("document root must be an object".to_string())
    })?;

    let mut dropped = 0;
    let genres = match root.get("genres") {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            let mut genres = Vec::with_capacity(items.len());
            for item in items {
                match decode_genre(item, &mut dropped)? {
                    Some(genre) => genres.push(genre),
                    None => dropped += 1,
                }
            }
            genres
        }
        Some(_) => {
            return Err(StorageError::InvalidShape(
                "`genres` must be an array".to_string(),
            ))
        }
    };

    Ok(DecodedDocument { genres, dropped })
}

fn decode_genre(value: &Value, dropped: &mut usize) -> StorageResult<Option<Genre>> {
    let Some((fields, name)) = named_record(value) else {
        return Ok(None);
    };

    let mut genre = Genre::new(name, None);
    genre.summary = optional_string(fields, "summary");
    genre.missions = match fields.get("missions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut missions = Vec::with_capacity(items.len());
            for item in items {
                match decode_mission(item, dropped) {
                    Some(mission) => missions.push(mission),
                    None => *dropped += 1,
                }
            }
            missions
        }
        Some(_) => {
            return Err(StorageError::InvalidShape(format!(
                "`missions` of genre `{}` must be an array",
                genre.name
            )))
        }
    };
    Ok(Some(genre))
}

fn decode_mission(value: &Value, dropped: &mut usize) -> Option<Mission> {
    let (fields, name) = named_record(value)?;

    let mut mission = Mission::new(name);
    mission.summary = optional_string(fields, "summary");
    mission.due_date = optional_string(fields, "due_date");
    mission.completed_at = optional_string(fields, "completed_at");
    if let Some(Value::Array(items)) = fields.get("tasks") {
        mission.tasks.reserve(items.len());
        for item in items {
            match decode_task(item) {
                Some(task) => mission.tasks.push(task),
                None => *dropped += 1,
            }
        }
    }
    Some(mission)
}

fn decode_task(value: &Value) -> Option<Task> {
    let (fields, name) = named_record(value)?;

    let mut task = Task::new(name);
    task.done = fields.get("done").and_then(Value::as_bool).unwrap_or(false);
    task.due_date = optional_string(fields, "due_date");
    task.completed_at = optional_string(fields, "completed_at");
    Some(task)
}

fn named_record(value: &Value) -> Option<(&Map<String, Value>, &str)> {
    let fields = value.as_object()?;
    let name = fields.get("name")?.as_str()?;
    Some((fields, name))
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}
