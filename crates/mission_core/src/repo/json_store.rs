//! File-backed JSON genre store.
//!
//! # Responsibility
//! - Own one JSON document on disk holding the whole hierarchy.
//! - Create the data directory and an empty document on first use.
//!
//! # Invariants
//! - Saves go through a same-directory temp file and an atomic rename.
//! - Loading a missing document recreates it empty and returns no genres.
//! - Concurrent processes sharing one path are unsupported (last writer wins).

use crate::config::CoreConfig;
use crate::model::entity::Genre;
use crate::repo::decode::decode_document;
use crate::repo::genre_store::{
    empty_document, encode_document, GenreStore, StorageError, StorageResult,
};
use log::{error, info, warn};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Genre store persisting to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonGenreStore {
    path: PathBuf,
}

impl JsonGenreStore {
    /// Opens (and if needed initializes) the store at `path`.
    ///
    /// # Errors
    /// - `CreateDir` when the parent directory cannot be created.
    /// - `Write` when the initial empty document cannot be written.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let store = Self { path: path.into() };
        let dir = store.dir();
        std::fs::create_dir_all(&dir).map_err(|source| {
            error!(
                "event=store_open module=repo status=error error_code=create_dir_failed error={}",
                source
            );
            StorageError::CreateDir { path: dir, source }
        })?;

        if !store.path.exists() {
            store.write_document(&empty_document()?)?;
            info!("event=store_init module=repo status=ok");
        }
        Ok(store)
    }

    /// Opens the store at the configured data path.
    pub fn open_default(config: &CoreConfig) -> StorageResult<Self> {
        Self::open(config.data_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn write_document(&self, contents: &str) -> StorageResult<()> {
        let write_error = |source: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(self.dir()).map_err(write_error)?;
        temp.write_all(contents.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(&self.path)
            .map_err(|err| write_error(err.error))?;
        Ok(())
    }
}

impl GenreStore for JsonGenreStore {
    fn load_genres(&self) -> StorageResult<Vec<Genre>> {
        let started_at = Instant::now();
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.write_document(&empty_document()?)?;
                info!("event=store_load module=repo status=ok genres=0 recreated=true");
                return Ok(Vec::new());
            }
            Err(source) => {
                error!(
                    "event=store_load module=repo status=error error_code=read_failed error={}",
                    source
                );
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let location = self.path.display().to_string();
        let decoded = match decode_document(&text, &location) {
            Ok(decoded) => decoded,
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error error_code=decode_failed error={}",
                    err
                );
                return Err(err);
            }
        };
        if decoded.dropped > 0 {
            warn!(
                "event=store_load module=repo status=lenient dropped_entries={}",
                decoded.dropped
            );
        }
        info!(
            "event=store_load module=repo status=ok genres={} duration_ms={}",
            decoded.genres.len(),
            started_at.elapsed().as_millis()
        );
        Ok(decoded.genres)
    }

    fn save_genres(&self, genres: &[Genre]) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = encode_document(genres).and_then(|text| self.write_document(&text));
        match &result {
            Ok(()) => info!(
                "event=store_save module=repo status=ok genres={} duration_ms={}",
                genres.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
