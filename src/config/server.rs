use crate::constants::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_BIND, DEFAULT_STATIC_DIR};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Origins allowed for CORS requests and WebSocket upgrades
    pub allowed_origins: Vec<String>,
    /// Directory served at `/`
    pub static_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerSettings {
    /// Returns true when `origin` is in the allow-list.
    ///
    /// Entries without a scheme match on `host:port` alone.
    pub fn origin_allowed(&self, origin: &str) -> bool {
        let host = origin
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(origin)
            .trim_end_matches('/');
        self.allowed_origins.iter().any(|allowed| {
            let allowed = allowed.trim_end_matches('/');
            allowed == "*" || allowed == origin.trim_end_matches('/') || allowed == host
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawServer {
    pub(super) bind: Option<String>,
    pub(super) allowed_origins: Option<Vec<String>>,
    pub(super) static_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_matching_accepts_scheme_less_entries() {
        let settings = ServerSettings {
            allowed_origins: vec!["http://localhost:8080".into(), "127.0.0.1:5500".into()],
            ..ServerSettings::default()
        };
        assert!(settings.origin_allowed("http://localhost:8080"));
        assert!(settings.origin_allowed("http://127.0.0.1:5500"));
        assert!(!settings.origin_allowed("http://evil.example"));
    }

    #[test]
    fn wildcard_allows_everything() {
        let settings = ServerSettings {
            allowed_origins: vec!["*".into()],
            ..ServerSettings::default()
        };
        assert!(settings.origin_allowed("https://anywhere.example"));
    }
}
