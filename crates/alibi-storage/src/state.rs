use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Load a JSON value from the store. `Ok(None)` if the key is absent.
pub fn load_state<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize a value and write it under `key`, replacing what was there.
pub fn save_state<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_string(value)?;
    store.set(key, &body)
}
