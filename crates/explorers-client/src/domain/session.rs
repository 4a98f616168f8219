//! Session Entity
//!
//! The credential pair authorizing API calls.

use serde::{Deserialize, Serialize};

/// Access token plus optional refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }

    /// A session is usable only with a non-blank access token
    pub fn is_usable(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_parses_both_shapes() {
        let s: Session =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert_eq!(s, Session::new("a", Some("r".into())));

        let s: Session = serde_json::from_str(r#"{"token":"legacy"}"#).unwrap();
        assert_eq!(s.access_token, "legacy");
        assert!(s.refresh_token.is_none());
    }

    #[test]
    fn blank_token_is_not_usable() {
        assert!(!Session::new("  ", None).is_usable());
        assert!(Session::new("t", None).is_usable());
    }
}
