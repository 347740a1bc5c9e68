use gloo::storage::{LocalStorage, Storage};
use square_fruit_core::{GameError, KeyValueStore, Result};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Browser local storage, holding raw JSON strings.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalStore;

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Could not read {key} from local storage: {err:?}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw().set_item(key, value).map_err(|err| {
            log::error!("Could not save {key} to local storage: {err:?}");
            GameError::Storage
        })
    }

    fn remove(&mut self, key: &str) {
        LocalStorage::delete(key);
    }
}
