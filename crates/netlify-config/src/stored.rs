//! Stored Netlify credentials
//!
//! Two schemas exist in the wild:
//!
//! ```json
//! { "access_token": "..." }
//! { "userId": "abc", "users": { "abc": { "auth": { "token": "..." } } } }
//! ```
//!
//! A non-empty flat `access_token` always wins over the users map.

use crate::{ConfigError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::{Read, Write};
use std::path::Path;

/// A token stored for one Netlify user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserToken {
    pub user_id: String,
    pub token: String,
}

/// The credentials found in a Netlify config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredCredentials {
    /// Flat `access_token`
    Token(String),
    /// Per-user tokens. The entry named by `userId` comes first, the rest
    /// follow in file order.
    Users(Vec<UserToken>),
    /// Neither a flat token nor any users
    Empty,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    access_token: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
    users: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUser {
    auth: RawAuth,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAuth {
    token: Option<String>,
}

impl StoredCredentials {
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        let raw: RawConfig = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: RawConfig = serde_json::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        if let Some(token) = raw.access_token.filter(|t| !t.is_empty()) {
            return StoredCredentials::Token(token);
        }

        let users = raw.users.unwrap_or_default();
        if users.is_empty() {
            return StoredCredentials::Empty;
        }

        let mut tokens: Vec<UserToken> = users
            .into_iter()
            .map(|(user_id, value)| {
                // Entries with an unexpected shape are kept with an empty
                // token so they still fail validation like any bad token.
                let user: RawUser = serde_json::from_value(value).unwrap_or_default();
                UserToken {
                    user_id,
                    token: user.auth.token.unwrap_or_default(),
                }
            })
            .collect();

        if let Some(current) = raw.user_id.filter(|id| !id.is_empty()) {
            if let Some(pos) = tokens.iter().position(|u| u.user_id == current) {
                let entry = tokens.remove(pos);
                tokens.insert(0, entry);
            }
        }

        StoredCredentials::Users(tokens)
    }
}

/// Persist `token` as the flat `access_token` in the config file at `path`.
///
/// Other top-level keys of an existing JSON object are kept. The parent
/// directory is created with mode 0700 and the file is written with mode 0600.
pub fn save_access_token(path: &Path, token: &str) -> Result<()> {
    let write_err = |source: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().unwrap_or(Path::new("."));
    create_private_dir(parent).map_err(write_err)?;

    let mut config = match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::debug!("Replacing unreadable config at {:?}", path);
                Map::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    config.insert(
        "access_token".to_string(),
        Value::String(token.to_string()),
    );

    let mut content = serde_json::to_string_pretty(&Value::Object(config)).map_err(|e| {
        ConfigError::JsonParseError {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    content.push('\n');

    // NamedTempFile is created with mode 0600 on Unix, and the rename keeps it
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!("Saved Netlify access token to {:?}", path);
    Ok(())
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}
