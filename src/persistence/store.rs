use super::files::{atomic_write, read_file};
use crate::domain::{DailyTask, Reminder, RollingTodo, Transition};
use crate::error::StoreError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Everything the dashboard persists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub dailies: Vec<DailyTask>,
    #[serde(default)]
    pub rolling_todos: Vec<RollingTodo>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl AppData {
    /// Arm reminders that were stored with a spec but never given a target.
    /// Returns true when at least one reminder was armed.
    pub fn arm_pending_reminders(&mut self, now: &DateTime<Local>) -> bool {
        let mut armed = false;
        for reminder in &mut self.reminders {
            if reminder.target_time.is_some() || reminder.spec.trim().is_empty() {
                continue;
            }
            if reminder.arm(now) == Transition::Armed {
                armed = true;
            }
        }
        armed
    }
}

/// Marker that changes whenever the stored data is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub modified: SystemTime,
    pub len: u64,
}

/// Load/save pair backing the dashboard
pub trait Store {
    fn load(&self) -> Result<AppData, StoreError>;
    fn save(&self, data: &AppData) -> Result<(), StoreError>;

    /// Current revision of the stored data, `None` when the store cannot tell
    fn revision(&self) -> Result<Option<Revision>, StoreError> {
        Ok(None)
    }
}

/// Pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable data file is moved aside to
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }
}

impl Store for JsonStore {
    /// A missing file is created with empty data. A file that does not parse
    /// is moved to `<name>.bak` and empty data is returned.
    fn load(&self) -> Result<AppData, StoreError> {
        let Some(content) = read_file(&self.path)? else {
            debug!(path = %self.path.display(), "no data file yet, creating one");
            let data = AppData::default();
            self.save(&data)?;
            return Ok(data);
        };

        match serde_json::from_str(&content) {
            Ok(data) => Ok(data),
            Err(err) => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup).map_err(|e| StoreError::io(&self.path, e))?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    %err,
                    "failed to parse data file, moved it aside and using defaults"
                );
                Ok(AppData::default())
            }
        }
    }

    fn save(&self, data: &AppData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(data)?;
        atomic_write(&self.path, &json)
    }

    fn revision(&self) -> Result<Option<Revision>, StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) => {
                let modified = meta.modified().map_err(|e| StoreError::io(&self.path, e))?;
                Ok(Some(Revision {
                    modified,
                    len: meta.len(),
                }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}
