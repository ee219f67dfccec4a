//! Offline request outbox.
//!
//! Writes destined for the remote API are appended to a JSONL file with
//! file locking, so they can be uploaded later and never interleave when two
//! processes queue at once.

use crate::records::{ApiError, Method, RemoteApi, RequestOptions};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A queued request
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OutboxEntry {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
}

/// `RemoteApi` that queues writes to a JSONL outbox instead of sending them
///
/// The token is not written to disk; it is attached at upload time.
pub struct OutboxApi {
    path: PathBuf,
}

impl OutboxApi {
    /// Create an outbox at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn append(&self, entry: &OutboxEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Queued {:?} {} as {}", entry.method, entry.path, entry.id);
        Ok(())
    }
}

impl RemoteApi for OutboxApi {
    fn request(&mut self, path: &str, options: RequestOptions) -> Result<Value> {
        if options.method == Method::Get {
            // Reads need the live service
            return Err(Error::Api(ApiError::new(
                503,
                format!("offline: cannot read {}", path),
            )));
        }

        let entry = OutboxEntry {
            id: Uuid::new_v4(),
            queued_at: Utc::now(),
            path: path.to_string(),
            method: options.method,
            body: options.body,
        };
        self.append(&entry)?;

        Ok(json!({ "queued": true, "id": entry.id }))
    }
}

/// Read all queued requests
///
/// Malformed lines (e.g. a partial write after a crash) are skipped with a warning.
pub fn read_outbox(path: &Path) -> Result<Vec<OutboxEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<OutboxEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed outbox line {} in {:?}: {}",
                    line_num + 1,
                    path,
                    e
                );
            }
        }
    }

    file.unlock()?;
    Ok(entries)
}
