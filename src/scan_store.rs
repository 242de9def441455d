use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::label::NutritionRecord;

/// Key the most recent scan is stored under.
pub const LAST_SCAN_KEY: &str = "lastScan";

/// Small file-backed key/value store of JSON blobs.
///
/// Each value is kept as a JSON string, mirroring browser local storage.
pub struct ScanStore {
    path: PathBuf,
}

impl ScanStore {
    pub const FILE_NAME: &'static str = "scans.json";

    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| StoreError::Serialization {
                path: self.path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Encode {
            key: Self::FILE_NAME.to_string(),
            source,
        })?;
        std::fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let blob = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), blob);
        self.write_all(&entries)?;
        debug!(key, path = %self.path.display(), "stored value");
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let entries = self.read_all()?;
        match entries.get(key) {
            Some(blob) => serde_json::from_str(blob)
                .map(Some)
                .map_err(|source| StoreError::Serialization {
                    path: format!("{}#{}", self.path.display(), key),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn save_last_scan(&self, record: &NutritionRecord) -> Result<(), StoreError> {
        self.set(LAST_SCAN_KEY, record)?;
        info!(product = %record.product_name, "saved last scan");
        Ok(())
    }

    pub fn load_last_scan(&self) -> Result<Option<NutritionRecord>, StoreError> {
        self.get(LAST_SCAN_KEY)
    }
}
