//! Local Storage Token Store

use explorers_client::{ApiError, ApiResult, TokenStore};

/// Tokens in `window.localStorage`
///
/// The storage handle is looked up per call, so the store holds no JS value.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let storage =
            local_storage().ok_or_else(|| ApiError::Storage("local storage is unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                log::warn!("could not clear {} from local storage: {:?}", key, e);
            }
        }
    }
}
