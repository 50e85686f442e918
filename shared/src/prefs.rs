use std::{cell::RefCell, collections::HashMap};

use tracing::debug;

use crate::{
    config::{DEFAULT_ZOOM, LANGUAGE_KEY, MAX_ZOOM, MIN_ZOOM, ZOOM_KEY},
    locale::Lang,
};

/// Durable key-value backend. Implementations swallow their own failures:
/// a read that cannot be served is `None`, a write that fails is dropped.
pub trait PrefStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-process storage, used by tests and as the fallback when no durable
/// backend is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: RefCell::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }
}

impl PrefStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionPrefs {
    pub lang: Lang,
    pub zoom: f64,
}

impl Default for SessionPrefs {
    fn default() -> Self {
        Self {
            lang: Lang::En,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl SessionPrefs {
    /// Read both entries; anything absent or unparsable keeps its default.
    pub fn load(storage: &dyn PrefStorage) -> Self {
        let defaults = Self::default();
        let lang = storage
            .get(LANGUAGE_KEY)
            .and_then(|raw| Lang::from_code(&raw))
            .unwrap_or(defaults.lang);
        let zoom = storage
            .get(ZOOM_KEY)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|z| z.is_finite())
            .map(clamp_zoom)
            .unwrap_or(defaults.zoom);
        debug!(%lang, zoom, "session preferences restored");
        Self {
            lang,
            zoom,
        }
    }

    pub fn save(&self, storage: &dyn PrefStorage) {
        storage.set(LANGUAGE_KEY, self.lang.code());
        storage.set(ZOOM_KEY, &self.zoom.to_string());
    }
}

/// Clamp to the supported range and drop float noise from repeated steps.
pub fn clamp_zoom(zoom: f64) -> f64 {
    let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    (clamped * 100.0).round() / 100.0
}

/// `"110%"` style label.
pub fn zoom_label(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round() as i64)
}
