//! Reading a usable access token out of a Netlify config file

use crate::{CredentialError, HostAccessCheck, Result};
use netlify_config::{AuthPaths, ConfigError, StoredCredentials};
use std::io::{BufReader, Read};

/// Read the config in `reader` and return the token that grants access to
/// `host`.
///
/// - A flat `access_token` is validated and returned, or its validation
///   error is returned. Per-user tokens are not consulted.
/// - Otherwise each user token is tried in order and the first valid one is
///   returned. If none is valid, the last validation error is returned.
/// - A config with no tokens at all yields `Ok(None)`.
pub async fn read_token<R: Read>(
    reader: R,
    host: &str,
    check: &dyn HostAccessCheck,
) -> Result<Option<String>> {
    let stored = StoredCredentials::from_reader(reader)?;
    select_token(stored, host, check).await
}

/// Read the token from the first config file in `paths` that opens.
///
/// `Ok(None)` when no candidate exists or the one found holds no tokens.
pub async fn read_token_from_paths(
    paths: &AuthPaths,
    host: &str,
    check: &dyn HostAccessCheck,
) -> Result<Option<String>> {
    let Some((path, file)) = paths.open_first() else {
        tracing::debug!("No Netlify config file found");
        return Ok(None);
    };

    let stored = StoredCredentials::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            ConfigError::ReadError {
                path,
                source: source.into(),
            }
        } else {
            ConfigError::JsonParseError { path, source }
        }
    })?;
    select_token(stored, host, check).await
}

async fn select_token(
    stored: StoredCredentials,
    host: &str,
    check: &dyn HostAccessCheck,
) -> Result<Option<String>> {
    match stored {
        StoredCredentials::Token(token) => {
            check.check(host, &token).await?;
            Ok(Some(token))
        }
        StoredCredentials::Users(users) => {
            let mut last_error: Option<CredentialError> = None;
            for user in users {
                match check.check(host, &user.token).await {
                    Ok(()) => {
                        tracing::debug!("Using access token of Netlify user {}", user.user_id);
                        return Ok(Some(user.token));
                    }
                    Err(e) => {
                        tracing::debug!(
                            "Access token of Netlify user {} rejected: {}",
                            user.user_id,
                            e
                        );
                        last_error = Some(e);
                    }
                }
            }
            match last_error {
                Some(e) => Err(e),
                None => Ok(None),
            }
        }
        StoredCredentials::Empty => Ok(None),
    }
}
