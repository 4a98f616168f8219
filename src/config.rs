//! Build-time Configuration
//!
//! | variable                 | effect                                   |
//! |--------------------------|------------------------------------------|
//! | `EXPLORERS_API_BASE`     | API scheme and host (default same origin) |
//! | `EXPLORERS_API_PREFIX`   | versioned prefix (default `/api/v1`)     |
//! | `EXPLORERS_DEBUG_LOGIN`  | `true` shows the debug login button      |
//! | `EXPLORERS_DEMO_BACKEND` | `true` serves the API from memory        |
//! | `EXPLORERS_LOG`          | `debug`, `info` (default) or `warn`      |

use explorers_client::ClientConfig;
use log::LevelFilter;

fn flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1") | Some("true") | Some("yes"))
}

pub fn client_config() -> ClientConfig {
    let mut config = ClientConfig::default()
        .with_debug_login(flag(option_env!("EXPLORERS_DEBUG_LOGIN")));
    if let Some(base) = option_env!("EXPLORERS_API_BASE") {
        config = config.with_base_url(base);
    }
    if let Some(prefix) = option_env!("EXPLORERS_API_PREFIX") {
        config = config.with_api_prefix(prefix);
    }
    if let Err(problem) = config.validate() {
        log::error!("invalid configuration ({}); using defaults", problem);
        return ClientConfig::default();
    }
    config
}

pub fn demo_backend() -> bool {
    flag(option_env!("EXPLORERS_DEMO_BACKEND"))
}

pub fn log_level() -> LevelFilter {
    match option_env!("EXPLORERS_LOG").map(str::trim) {
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        _ => LevelFilter::Info,
    }
}
