//! Bearer token storage.
//!
//! The HTTP client asks a [`TokenStore`] for the current token on every request;
//! logging in and out is somebody else's job, this module only persists and
//! reads the token.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::errors::AppError;

/// Key under which the token is kept in durable storage.
pub const TOKEN_KEY: &str = "auth_token";

/// Source of the bearer token attached to outgoing requests.
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when the user is not signed in.
    fn token(&self) -> Option<String>;
}

/// Format the `Authorization` header value for a token.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {}", token)
}

fn non_blank(token: &str) -> Option<String> {
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Token kept in a JSON object file under [`TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token, keeping any other keys already in the file.
    pub fn store_token(&self, token: &str) -> Result<(), AppError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(entries)
    }

    /// Remove the token, keeping any other keys already in the file.
    pub fn clear_token(&self) -> Result<(), AppError> {
        let Some(mut entries) = self.read_entries() else {
            return Ok(());
        };
        entries.remove(TOKEN_KEY);
        self.write_entries(entries)
    }

    fn read_entries(&self) -> Option<Map<String, Value>> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Some(entries),
            Ok(_) | Err(_) => {
                tracing::warn!("Ignoring unreadable token storage at {:?}", self.path);
                None
            }
        }
    }

    fn write_entries(&self, entries: Map<String, Value>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| AppError::Storage(format!("Failed to encode token storage: {}", e)))?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.read_entries()?
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .and_then(non_blank)
    }
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: RwLock::new(token.map(str::to_string)),
        }
    }

    pub fn set(&self, token: Option<&str>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token.map(str::to_string);
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .ok()
            .and_then(|guard| guard.as_deref().and_then(non_blank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bearer_value() {
        assert_eq!(bearer_value("abc123"), "Bearer abc123");
    }

    #[test]
    fn test_missing_file_has_no_token() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("missing.json"));
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_store_and_clear_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("auth.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        store.store_token("secret-token").unwrap();
        assert_eq!(store.token().as_deref(), Some("secret-token"));

        store.clear_token().unwrap();
        assert_eq!(store.token(), None);

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_garbage_and_blank_tokens_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(FileTokenStore::new(&path).token(), None);

        std::fs::write(&path, r#"{"auth_token":"   "}"#).unwrap();
        assert_eq!(FileTokenStore::new(&path).token(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new(None);
        assert_eq!(store.token(), None);
        store.set(Some("t1"));
        assert_eq!(store.token().as_deref(), Some("t1"));
        store.set(Some(""));
        assert_eq!(store.token(), None);
    }
}
