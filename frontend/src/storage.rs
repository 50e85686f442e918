use bilingual_reader_shared::PrefStorage;
use tracing::debug;
use web_sys::Storage;

/// `localStorage` behind [`PrefStorage`]. Private browsing modes may refuse
/// access entirely; reads then come back empty and writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn backend() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PrefStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backend()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::backend() else {
            debug!(key, "localStorage unavailable; preference not saved");
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            debug!(key, ?err, "localStorage write refused");
        }
    }
}
