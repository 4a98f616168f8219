//! Client Configuration
//!
//! Named, typed settings shared by the transport, session and controllers.

use serde::{Deserialize, Serialize};

/// Default number of rows per list page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default upper bound for uploaded images (2 MiB)
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 2 * 1024 * 1024;

/// Keys under which the session tokens are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub auth_token: String,
    pub refresh_token: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            auth_token: "authToken".to_string(),
            refresh_token: "refreshToken".to_string(),
        }
    }
}

/// Client configuration
///
/// | field                  | default          |
/// |------------------------|------------------|
/// | `base_url`             | `""` (same origin) |
/// | `api_prefix`           | `/api/v1`        |
/// | `default_page_size`    | 10               |
/// | `page_size_options`    | 10, 25, 50       |
/// | `debug_login`          | false            |
/// | `max_attachment_bytes` | 2 MiB            |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the API; empty means same origin as the page
    pub base_url: String,
    /// Versioned path prefix prepended to every resource path
    pub api_prefix: String,
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub storage_keys: StorageKeys,
    /// Enables the "Debug Login" bypass on the login screen
    pub debug_login: bool,
    pub max_attachment_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_prefix: "/api/v1".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50],
            storage_keys: StorageKeys::default(),
            debug_login: false,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_debug_login(mut self, enabled: bool) -> Self {
        self.debug_login = enabled;
        self
    }

    pub fn with_max_attachment_bytes(mut self, bytes: usize) -> Self {
        self.max_attachment_bytes = bytes;
        self
    }

    /// Full root that resource paths are appended to
    pub fn api_root(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }

    /// Check invariants the controllers rely on
    pub fn validate(&self) -> Result<(), String> {
        if self.default_page_size == 0 {
            return Err("default_page_size must be greater than zero".to_string());
        }
        if self.page_size_options.iter().any(|size| *size == 0) {
            return Err("page_size_options must not contain zero".to_string());
        }
        if self.storage_keys.auth_token.is_empty() || self.storage_keys.refresh_token.is_empty() {
            return Err("storage keys must not be empty".to_string());
        }
        if self.storage_keys.auth_token == self.storage_keys.refresh_token {
            return Err("auth and refresh tokens must use distinct storage keys".to_string());
        }
        Ok(())
    }
}
