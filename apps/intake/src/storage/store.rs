//! File-backed record store. One pretty-printed JSON file per finished
//! session, named after the anonymized identifier. Files are created once and
//! never rewritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::models::candidate::{AnonymizedRecord, CandidateRecord};
use crate::storage::anonymize::anonymize;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write record {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read record {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("invalid record id: {0:?}")]
    InvalidId(String),

    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Anonymizes `record` and writes it under a fresh identifier.
    pub async fn finalize(&self, record: &CandidateRecord) -> Result<AnonymizedRecord, StoreError> {
        let anonymized = anonymize(record, Utc::now());
        self.save(&anonymized).await?;
        Ok(anonymized)
    }

    /// Writes `record` to `<dir>/<id>.json`, creating the directory if needed.
    /// A write that fails part way removes the file it created.
    pub async fn save(&self, record: &AnonymizedRecord) -> Result<(), StoreError> {
        let path = self.record_path(&record.id)?;
        let json = serde_json::to_string_pretty(record)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        write_or_remove(file, &path, json.as_bytes()).await?;

        info!(record_id = %record.id, path = %path.display(), "Candidate record persisted");
        Ok(())
    }

    pub async fn load(&self, id: &str) -> Result<AnonymizedRecord, StoreError> {
        let path = self.record_path(id)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Only base64url identifiers map to paths, so an id can never escape `dir`.
    fn record_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

/// Writes `bytes` through `writer`, deleting `path` if any write fails.
async fn write_or_remove<W>(mut writer: W, path: &Path, bytes: &[u8]) -> Result<(), StoreError>
where
    W: AsyncWrite + Unpin,
{
    let result = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    drop(writer);

    let Err(source) = result else {
        return Ok(());
    };
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), "Failed to remove partial record: {e}");
    }
    Err(StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
