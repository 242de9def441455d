use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum AgeBand {
    #[serde(alias = "underAge")]
    #[value(name = "under18", alias = "under-age")]
    Under18,
    Young,
    Middle,
    Older,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    Athletic,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl AgeBand {
    pub const ALL: [AgeBand; 4] = [AgeBand::Under18, AgeBand::Young, AgeBand::Middle, AgeBand::Older];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::Under18 => "under18",
            AgeBand::Young => "young",
            AgeBand::Middle => "middle",
            AgeBand::Older => "older",
        }
    }
}

impl ActivityLevel {
    /// Ordered from least to most active.
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::Athletic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::Athletic => "athletic",
        }
    }
}

/// The demographic and activity selection that keys every table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub gender: Gender,
    #[serde(alias = "age")]
    pub age_band: AgeBand,
    pub activity_level: ActivityLevel,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            age_band: AgeBand::Young,
            activity_level: ActivityLevel::Moderate,
        }
    }
}

impl UserProfile {
    pub fn new(gender: Gender, age_band: AgeBand, activity_level: ActivityLevel) -> Self {
        Self { gender, age_band, activity_level }
    }

    /// Every one of the 2 x 4 x 4 profile combinations.
    pub fn all() -> impl Iterator<Item = UserProfile> {
        Gender::ALL.into_iter().flat_map(|gender| {
            AgeBand::ALL.into_iter().flat_map(move |age_band| {
                ActivityLevel::ALL
                    .into_iter()
                    .map(move |activity_level| UserProfile::new(gender, age_band, activity_level))
            })
        })
    }

    pub fn is_active(&self) -> bool {
        matches!(self.activity_level, ActivityLevel::Active | ActivityLevel::Athletic)
    }

    pub fn is_senior(&self) -> bool {
        self.age_band == AgeBand::Older
    }

    pub fn is_young(&self) -> bool {
        matches!(self.age_band, AgeBand::Under18 | AgeBand::Young)
    }

    /// Returns a copy with the fields present in `update` replaced.
    pub fn merged(&self, update: &ProfileUpdate) -> UserProfile {
        UserProfile {
            gender: update.gender.unwrap_or(self.gender),
            age_band: update.age_band.unwrap_or(self.age_band),
            activity_level: update.activity_level.unwrap_or(self.activity_level),
        }
    }
}

/// A partial profile selection; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub gender: Option<Gender>,
    pub age_band: Option<AgeBand>,
    pub activity_level: Option<ActivityLevel>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.gender.is_none() && self.age_band.is_none() && self.activity_level.is_none()
    }
}

/// Holds the current profile and persists it as `profile.json`.
///
/// The whole profile sits behind one lock, so `snapshot` never observes
/// a half-applied update.
pub struct ProfileStore {
    path: PathBuf,
    current: RwLock<UserProfile>,
}

impl ProfileStore {
    pub const FILE_NAME: &'static str = "profile.json";

    /// Opens the store in `data_dir`, falling back to the default profile
    /// when nothing has been saved yet.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let path = data_dir.join(Self::FILE_NAME);
        let profile = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| StoreError::Serialization {
                path: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved profile, using defaults");
                UserProfile::default()
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Ok(Self {
            path,
            current: RwLock::new(profile),
        })
    }

    pub fn snapshot(&self) -> UserProfile {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Applies `update`, writes the result to disk and returns it.
    pub fn update(&self, update: &ProfileUpdate) -> Result<UserProfile, StoreError> {
        // Disk is written under the write lock so memory and disk commit in the same order.
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let updated = guard.merged(update);
        self.persist(&updated)?;
        *guard = updated;
        drop(guard);
        info!(
            gender = updated.gender.as_str(),
            age_band = updated.age_band.as_str(),
            activity_level = updated.activity_level.as_str(),
            "profile updated"
        );
        Ok(updated)
    }

    fn persist(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let path_str = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(profile).map_err(|source| StoreError::Encode {
            key: Self::FILE_NAME.to_string(),
            source,
        })?;
        std::fs::write(&self.path, body).map_err(|source| StoreError::Io { path: path_str, source })
    }
}
