//! Ledger persistence behind a small repository trait.
//!
//! The desk never touches storage directly: it loads the whole [`Ledger`]
//! once per operation and saves it back once. [`MemoryRepository`] serves
//! tests and embedders; [`JsonFileRepository`] keeps the ledger in a single
//! pretty-printed JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::types::{Ledger, Settings};

pub trait Repository {
    fn load(&self) -> Result<Ledger, StoreError>;
    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError>;
}

/// Keeps the ledger in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    ledger: Ledger,
}

impl MemoryRepository {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Result<Ledger, StoreError> {
        Ok(self.ledger.clone())
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        self.ledger = ledger.clone();
        Ok(())
    }
}

/// Stores the ledger as JSON at `path`.
///
/// A missing file loads as an empty ledger with default settings. A
/// `settings` section that fails to decode or holds invalid rates is replaced
/// by the defaults; unreadable bookings or closures fail the load with
/// [`StoreError::Corrupt`]. Saves go to a sibling temporary file that is then
/// renamed over `path`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, source: serde_json::Error) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }

    /// Unreadable or invalid rates fall back to the defaults so that the
    /// bookings stay reachable.
    fn decode_settings(&self, stored: Value) -> Settings {
        let decoded = serde_json::from_value::<Settings>(stored)
            .map_err(|e| e.to_string())
            .and_then(|settings| {
                settings.validate().map_err(|e| e.to_string())?;
                Ok(settings)
            });

        match decoded {
            Ok(settings) => settings,
            Err(reason) => {
                warn!(
                    path = %self.path.display(),
                    %reason,
                    "stored settings unusable, using default rates"
                );
                Settings::default()
            }
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> Result<Ledger, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file, starting empty");
                return Ok(Ledger::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut value: Value = serde_json::from_str(&raw).map_err(|e| self.corrupt(e))?;
        let stored_settings = value.as_object_mut().and_then(|o| o.remove("settings"));

        let mut ledger: Ledger = serde_json::from_value(value).map_err(|e| self.corrupt(e))?;
        if let Some(stored) = stored_settings {
            ledger.settings = self.decode_settings(stored);
        }
        Ok(ledger)
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(ledger).map_err(|e| self.corrupt(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        info!(
            path = %self.path.display(),
            bookings = ledger.bookings.len(),
            closures = ledger.closures.len(),
            "ledger saved"
        );
        Ok(())
    }
}
