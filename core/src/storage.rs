use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::*;

/// Names the storage slot a persisted type lives in.
pub trait StorageKey {
    const KEY: &'static str;
}

impl StorageKey for GameConfig {
    const KEY: &'static str = "square-fruit-config";
}

impl StorageKey for UnlockedImages {
    const KEY: &'static str = "square-fruit-unlocked";
}

/// Persistent string storage that survives restarts, such as browser local storage.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Loads config and progress at startup and writes them back whenever they change.
///
/// The engine never touches storage itself; callers hand every new state to [`observe`].
/// Writes are not coupled to the in-memory state: a failed write is reported and retried on
/// the next observation.
///
/// [`observe`]: Persistence::observe
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    saved_config: Option<GameConfig>,
    saved_unlocked: Option<UnlockedImages>,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            saved_config: None,
            saved_unlocked: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads a slot, falling back to the default when it is absent or unreadable.
    ///
    /// Unreadable slots are dropped so the warning is not repeated on every start.
    pub fn load_or_default<T: StorageKey + DeserializeOwned + Default>(&mut self) -> T {
        let Some(raw) = self.store.read(T::KEY) else {
            return T::default();
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("could not load {}, using defaults: {err}", T::KEY);
            self.store.remove(T::KEY);
            T::default()
        })
    }

    pub fn save<T: StorageKey + Serialize>(&mut self, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|err| {
            log::error!("could not serialize {}: {err}", T::KEY);
            GameError::Serialization
        })?;
        self.store.write(T::KEY, &raw)
    }

    /// Builds the startup state from storage, on the config screen.
    pub fn load_state(&mut self) -> GameState {
        let loaded = self.load_or_default::<GameConfig>();
        let unlocked = self.load_or_default::<UnlockedImages>();

        // remember what was read, so the first observation writes back the normalized config
        self.saved_config = Some(loaded.clone());
        self.saved_unlocked = Some(unlocked.clone());
        let config = loaded.normalized();
        GameState::new(config, unlocked)
    }

    /// Writes every slot of `state` that differs from what was last written.
    pub fn observe(&mut self, state: &GameState) -> Result<()> {
        let config = if self.saved_config.as_ref() != Some(state.config()) {
            self.save(state.config())
                .map(|()| self.saved_config = Some(state.config().clone()))
        } else {
            Ok(())
        };

        let unlocked = if self.saved_unlocked.as_ref() != Some(state.unlocked_images()) {
            self.save(state.unlocked_images())
                .map(|()| self.saved_unlocked = Some(state.unlocked_images().clone()))
        } else {
            Ok(())
        };

        config.and(unlocked)
    }
}
