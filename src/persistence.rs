//! Durable profile persistence
//!
//! One JSON blob under one key: the unlock level plus the settings
//! sub-record. The host decides where keys actually live by handing in a
//! [`KeyValueStore`] (browser LocalStorage, a file, a test map). HP and
//! the in-run checkpoint are deliberately not part of the profile; they
//! reset every session.
//!
//! Missing or corrupt data never blocks startup: loading falls back to
//! defaults and leaves a log breadcrumb.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::run_state::RunState;
use crate::settings::Settings;

/// Storage key for the single persisted record
pub const PROFILE_KEY: &str = "cliffhop/profile";

/// Current profile layout version
const PROFILE_VERSION: u32 = 1;

/// Minimal string storage the host must provide
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// File-backed store: one JSON object per file, keys as fields. Writes go
/// straight through; a failed write is logged and the session carries on
/// with the in-memory state.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!("store file {} unreadable: {e}", self.path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let mut map = self.read_map();
        map.remove(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        if let Ok(json) = serde_json::to_string_pretty(&map) {
            if let Err(e) = std::fs::write(&self.path, json) {
                log::warn!("store write to {} failed: {e}", self.path.display());
            }
        }
    }
}

/// The durable subset of a player's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Layout version, for future migrations
    pub version: u32,
    /// Highest level the player may select
    pub highest_unlocked_level: u32,
    pub settings: Settings,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            highest_unlocked_level: 1,
            settings: Settings::default(),
        }
    }
}

impl Profile {
    /// Load from the store. Missing or corrupt data falls back to the
    /// default profile; settings volumes are clamped on the way in.
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(PROFILE_KEY) {
            match serde_json::from_str::<Profile>(&json) {
                Ok(mut profile) => {
                    profile.settings = profile.settings.clamped();
                    log::info!(
                        "Loaded profile (level {} unlocked)",
                        profile.highest_unlocked_level
                    );
                    return profile;
                }
                Err(e) => log::warn!("Stored profile unreadable, using defaults: {e}"),
            }
        } else {
            log::info!("No stored profile, starting fresh");
        }
        Self::default()
    }

    /// Serialize under [`PROFILE_KEY`].
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(PROFILE_KEY, &json);
            log::info!("Profile saved");
        }
    }

    /// Fold a finished (or in-progress) run back into the profile.
    pub fn absorb_run(&mut self, run: &RunState) {
        self.highest_unlocked_level = self.highest_unlocked_level.max(run.highest_unlocked_level());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_a_store() {
        let mut store = MemoryStore::new();
        let mut profile = Profile::default();
        profile.highest_unlocked_level = 3;
        profile.settings.muted = true;
        profile.save(&mut store);

        let loaded = Profile::load(&store);
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_missing_profile_defaults() {
        let store = MemoryStore::new();
        let profile = Profile::load(&store);
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.highest_unlocked_level, 1);
    }

    #[test]
    fn test_corrupt_profile_defaults() {
        let mut store = MemoryStore::new();
        store.set(PROFILE_KEY, "{ definitely not a profile");
        let profile = Profile::load(&store);
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_load_clamps_tampered_volumes() {
        let mut store = MemoryStore::new();
        store.set(
            PROFILE_KEY,
            r#"{
                "version": 1,
                "highest_unlocked_level": 2,
                "settings": {
                    "master_volume": 9.0,
                    "music_volume": 0.5,
                    "sfx_volume": -2.0,
                    "muted": false
                }
            }"#,
        );
        let profile = Profile::load(&store);
        assert_eq!(profile.highest_unlocked_level, 2);
        assert_eq!(profile.settings.master_volume, 1.0);
        assert_eq!(profile.settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_absorb_run_keeps_the_maximum() {
        let mut profile = Profile::default();
        profile.highest_unlocked_level = 4;

        let mut run = RunState::new(3, 9);
        run.unlock_through(2);
        profile.absorb_run(&run);
        assert_eq!(profile.highest_unlocked_level, 4, "absorb never regresses");

        run.unlock_through(6);
        profile.absorb_run(&run);
        assert_eq!(profile.highest_unlocked_level, 6);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "cliffhop-profile-test-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::new(&path);
        assert!(store.get(PROFILE_KEY).is_none());

        let mut profile = Profile::default();
        profile.highest_unlocked_level = 5;
        profile.save(&mut store);

        let reopened = FileStore::new(&path);
        let loaded = Profile::load(&reopened);
        assert_eq!(loaded.highest_unlocked_level, 5);

        let _ = std::fs::remove_file(&path);
    }
}
