use overseas_board_shared::{BoardError, BoardResult, KeyValueStore};
use web_sys::{console, Storage};

/// `window.localStorage`. Every call looks the storage up again, so the
/// handle is free to copy around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorage;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> BoardResult<()> {
        let storage =
            local_storage().ok_or_else(|| BoardError::Storage("localStorage is unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| BoardError::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.remove_item(key) {
                console::warn_1(&format!("Failed to remove {key}: {err:?}").into());
            }
        }
    }
}
