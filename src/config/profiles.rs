//! Persisted named (address, token) pairs.
//!
//! The store is a single TOML file, by default `<home>/.humio/profiles.toml`:
//!
//! ```toml
//! [profiles.prod]
//! address = "https://prod"
//! token = "p-tok"
//! ```
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::lib::{
    errors::{ProfileDecodeError, ProfileStoreError},
    fs, paths,
};

/// A named address/token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub address: String,
    pub token: String,
}

/// Outcome of [`ProfileStore::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRemoveStatus {
    Removed,
    NotFound,
}

/// Source of profiles for the resolver.
pub trait ProfileLookup {
    fn lookup(&self, name: &str) -> Result<Profile, ProfileStoreError>;
}

impl<F> ProfileLookup for F
where
    F: Fn(&str) -> Result<Profile, ProfileStoreError>,
{
    fn lookup(&self, name: &str) -> Result<Profile, ProfileStoreError> {
        self(name)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    profiles: BTreeMap<String, ProfileEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileEntry {
    #[serde(default)]
    address: String,
    #[serde(default)]
    token: String,
}

/// File-backed profile store.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<home>/.humio/profiles.toml`.
    pub fn open_default() -> Result<Self, ProfileStoreError> {
        paths::default_profiles_path()
            .map(Self::at)
            .ok_or(ProfileStoreError::HomeDirUnavailable)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load one profile by name.
    pub fn load(&self, name: &str) -> Result<Profile, ProfileStoreError> {
        let document = self.read_document()?;
        let entry = document
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ProfileStoreError::NotFound {
                name: name.to_string(),
                path: self.path.clone(),
            })?;

        debug!(
            target: "humioctl::profiles",
            path = %self.path.display(),
            profile = name,
            "Loaded profile"
        );
        Ok(entry.into_profile(name))
    }

    /// Insert or replace a profile. Last write wins for a colliding name.
    pub fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        validate_profile_name(&profile.name)?;
        let mut document = self.read_document()?;
        let replaced = document
            .profiles
            .insert(
                profile.name.clone(),
                ProfileEntry {
                    address: profile.address.clone(),
                    token: profile.token.clone(),
                },
            )
            .is_some();
        self.write_document(&document)?;

        info!(
            target: "humioctl::profiles",
            path = %self.path.display(),
            profile = %profile.name,
            replaced,
            "Saved profile"
        );
        Ok(())
    }

    /// All profiles, ordered by name.
    pub fn list(&self) -> Result<Vec<Profile>, ProfileStoreError> {
        let document = self.read_document()?;
        Ok(document
            .profiles
            .into_iter()
            .map(|(name, entry)| entry.into_profile(&name))
            .collect())
    }

    /// Remove a profile. Unknown names are reported, not treated as errors.
    pub fn delete(&self, name: &str) -> Result<ProfileRemoveStatus, ProfileStoreError> {
        let mut document = self.read_document()?;
        if document.profiles.remove(name).is_none() {
            return Ok(ProfileRemoveStatus::NotFound);
        }
        self.write_document(&document)?;

        info!(
            target: "humioctl::profiles",
            path = %self.path.display(),
            profile = name,
            "Removed profile"
        );
        Ok(ProfileRemoveStatus::Removed)
    }

    fn read_document(&self) -> Result<ProfileDocument, ProfileStoreError> {
        let contents = fs::read_optional(&self.path).map_err(|source| ProfileStoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        match contents {
            Some(bytes) => decode_document(bytes).map_err(|source| ProfileStoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            None => Ok(ProfileDocument::default()),
        }
    }

    fn write_document(&self, document: &ProfileDocument) -> Result<(), ProfileStoreError> {
        let encoded =
            toml::to_string_pretty(document).map_err(|source| ProfileStoreError::Encode {
                path: self.path.clone(),
                source,
            })?;
        fs::write_atomically(&self.path, encoded.as_bytes()).map_err(|source| {
            ProfileStoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl ProfileLookup for ProfileStore {
    fn lookup(&self, name: &str) -> Result<Profile, ProfileStoreError> {
        self.load(name)
    }
}

impl ProfileEntry {
    fn into_profile(self, name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            address: self.address,
            token: self.token,
        }
    }
}

fn decode_document(bytes: Vec<u8>) -> Result<ProfileDocument, ProfileDecodeError> {
    let contents = String::from_utf8(bytes)?;
    Ok(toml::from_str(&contents)?)
}

/// Profile names are table keys in the store: non-empty, no whitespace, no `.`.
pub fn validate_profile_name(name: &str) -> Result<(), ProfileStoreError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else if name.contains('.') {
        Some("name cannot contain `.`")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ProfileStoreError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
