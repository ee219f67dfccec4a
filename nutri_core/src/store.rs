//! Local state persistence with file locking.
//!
//! Holds the latest goal and the latest saved workout plan. Saves are atomic
//! (temp file + rename); a missing or corrupt file loads as defaults.
//! `update` serializes read-modify-write cycles through an exclusive lock on a
//! `<state>.lock` sidecar, since the rename replaces the state file's inode.

use crate::plan::PlanRequest;
use crate::records::GoalRecord;
use crate::{Error, Result, WorkoutPlanEntry};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// A generated plan the user chose to keep
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedPlan {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub request: PlanRequest,
    pub entries: Vec<WorkoutPlanEntry>,
}

impl SavedPlan {
    pub fn new(request: PlanRequest, entries: Vec<WorkoutPlanEntry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            request,
            entries,
        }
    }
}

/// User's persisted nutrition state
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct NutritionState {
    #[serde(default)]
    pub goal: Option<GoalRecord>,
    #[serde(default)]
    pub plan: Option<SavedPlan>,
}

impl NutritionState {
    /// Load state from a file with shared locking
    ///
    /// Returns default state if file doesn't exist.
    /// If file is corrupted, logs a warning and returns default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state file found, using default state");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open state file {:?}: {}. Using defaults.", path, e);
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock state file {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        if let Err(e) = read {
            tracing::warn!("Failed to read state file {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        match serde_json::from_str::<NutritionState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded state from {:?}", path);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!("Failed to parse state file {:?}: {}. Using defaults.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save state atomically: temp file, fsync, rename over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back
    ///
    /// Holds the sidecar lock for the whole cycle so concurrent updates of
    /// different fields never overwrite each other.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut NutritionState) -> Result<()>,
    {
        let lock_path = lock_path_for(path);
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;
        lock.lock_exclusive()?;

        let result = Self::load(path).and_then(|mut state| {
            f(&mut state)?;
            state.save(path)?;
            Ok(state)
        });

        lock.unlock()?;
        result
    }
}

/// Sidecar lock file next to the state file (`state.json` → `state.json.lock`)
fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}
