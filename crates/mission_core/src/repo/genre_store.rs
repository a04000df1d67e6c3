//! Genre store contract, storage errors, and document encoding.
//!
//! # Responsibility
//! - Provide the load/save interface shared by every backing store.
//! - Render the `{"genres": [...]}` document written by every store.

use crate::model::entity::Genre;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by backing-store operations.
#[derive(Debug)]
pub enum StorageError {
    /// Store directory could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Store document exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Store document is not valid JSON.
    Parse {
        location: String,
        source: serde_json::Error,
    },
    /// Document parsed but a container has the wrong shape.
    InvalidShape(String),
    /// Hierarchy could not be rendered as JSON.
    Serialize(serde_json::Error),
    /// Store document could not be written or replaced.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Store refused the operation.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create data directory `{}`: {source}",
                path.display()
            ),
            Self::Read { path, source } => {
                write!(f, "failed to read store `{}`: {source}", path.display())
            }
            Self::Parse { location, source } => {
                write!(f, "failed to parse JSON in `{location}`: {source}")
            }
            Self::InvalidShape(message) => write!(f, "invalid store document: {message}"),
            Self::Serialize(err) => write!(f, "failed to serialize genres: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write store `{}`: {source}", path.display())
            }
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
            Self::InvalidShape(_) | Self::Unavailable(_) => None,
        }
    }
}

/// Backing store for the whole genre hierarchy.
pub trait GenreStore {
    /// Loads every genre, leniently normalizing legacy records.
    fn load_genres(&self) -> StorageResult<Vec<Genre>>;
    /// Replaces the stored hierarchy with `genres` exactly as given.
    fn save_genres(&self, genres: &[Genre]) -> StorageResult<()>;
}

impl<S: GenreStore + ?Sized> GenreStore for &S {
    fn load_genres(&self) -> StorageResult<Vec<Genre>> {
        (**self).load_genres()
    }

    fn save_genres(&self, genres: &[Genre]) -> StorageResult<()> {
        (**self).save_genres(genres)
    }
}

#[derive(Serialize)]
struct GenreDocument<'a> {
    genres: &'a [Genre],
}

/// Renders the persisted document for `genres` as indented UTF-8 JSON.
pub fn encode_document(genres: &[Genre]) -> StorageResult<String> {
    serde_json::to_string_pretty(&GenreDocument { genres }).map_err(StorageError::Serialize)
}

/// Document written when a store is first created.
pub fn empty_document() -> StorageResult<String> {
    encode_document(&[])
}
