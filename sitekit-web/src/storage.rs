use sitekit_core::PreferenceStore;

use crate::dom;

/// `localStorage`-backed preferences. Unavailable storage (private mode, disabled
/// cookies) reads as empty and ignores writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPreferences;

impl PreferenceStore for LocalPreferences {
    fn get(&self, key: &str) -> Option<String> {
        dom::local_storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = dom::local_storage()
            && let Err(err) = storage.set_item(key, value)
        {
            log::warn!(
                "Failed to persist {key}: {}",
                dom::js_error_message(&err)
            );
        }
    }
}
