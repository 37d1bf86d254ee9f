//! Durable storage for the application list.
//!
//! One named slot holds the entire list as a JSON array; every save
//! overwrites it whole. The store talks to the [`StorageBackend`] trait so
//! tests can swap the file for an in-memory fake.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use crate::schema::Application;

/// Slot holding the serialized application list.
pub const APPLICATIONS_FILE: &str = "applications.json";
/// Reserved for the theme preference; not managed by this crate.
pub const THEME_FILE: &str = "theme.json";

/// Persistence port: load and overwrite the full list.
pub trait StorageBackend {
    fn load(&self) -> Result<Vec<Application>>;
    fn save(&self, apps: &[Application]) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON-file backend rooted in the tracker's data directory.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(APPLICATIONS_FILE),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StorageBackend for JsonFileStorage {
    /// Absent slot loads as an empty list. A malformed slot also loads as an
    /// empty list, logged at WARN; the file itself is left untouched until
    /// the next mutation saves over it.
    fn load(&self) -> Result<Vec<Application>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        match serde_json::from_str(&raw) {
            Ok(apps) => Ok(apps),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "stored applications are malformed, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, apps: &[Application]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string(apps).context("failed to serialize applications")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStorage {
    slot: std::sync::Mutex<Option<Vec<Application>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot, as if a previous session had saved.
    pub fn with_contents(apps: Vec<Application>) -> Self {
        Self {
            slot: std::sync::Mutex::new(Some(apps)),
        }
    }

    /// True when nothing has ever been saved (or the slot was cleared).
    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Vec<Application>> {
        Ok(self.slot.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, apps: &[Application]) -> Result<()> {
        *self.slot.lock().unwrap() = Some(apps.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
