//! Mock-based command tests.
//!
//! These call command functions directly with a `CredentialHelper` backed by
//! a `MockApi`, avoiding any real network access.

use git_credential_netlify::commands;
use netlify_config::{AuthPaths, HelperSettings, StoredCredentials};
use netlify_credentials::protocol::CredentialRequest;
use netlify_credentials::test_support::{fast_poll, MockApi, RecordingBrowser};
use netlify_credentials::CredentialHelper;
use std::path::Path;
use std::sync::Arc;

/// Candidate paths rooted in a temp dir: primary, then a legacy file
fn paths_in(dir: &Path) -> AuthPaths {
    AuthPaths::from_paths(vec![
        dir.join("netlify").join("config.json"),
        dir.join(".netlify").join("config.json"),
        dir.join(".netlify").join("config"),
    ])
}

fn write_config(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

async fn get(helper: &CredentialHelper, input: &str) -> anyhow::Result<String> {
    let mut out = Vec::new();
    commands::get(helper, input.as_bytes(), &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

// ---- tests ----

#[tokio::test]
async fn test_get_with_env_token() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = HelperSettings {
        access_token: Some("verysecret".to_string()),
        ..Default::default()
    };
    let api = Arc::new(MockApi::new().with_large_media_site("foo.netlify.app", "verysecret"));
    let helper = CredentialHelper::with_api(settings, paths_in(tmp.path()), api)
        .with_interactive(false);

    let out = get(&helper, "host=foo.netlify.app\n").await.unwrap();
    let response = CredentialRequest::parse(&out);
    assert_eq!(response.get("host"), Some("foo.netlify.app"));
    assert_eq!(response.get("username"), Some("access-token"));
    assert_eq!(response.get("password"), Some("verysecret"));
}

#[tokio::test]
async fn test_get_from_legacy_multi_user_config() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(
        &tmp.path().join(".netlify").join("config"),
        r#"{
            "users": {
                "a": { "auth": { "token": "revoked" } },
                "b": { "auth": { "token": "current" } }
            }
        }"#,
    );
    let api = Arc::new(MockApi::new().with_large_media_site("site.netlify.com", "current"));
    let helper = CredentialHelper::with_api(HelperSettings::default(), paths_in(tmp.path()), api)
        .with_interactive(false);

    let out = get(&helper, "protocol=https\nhost=site.netlify.com\npath=x/info/lfs\n")
        .await
        .unwrap();
    assert_eq!(
        out,
        "protocol=https\nhost=site.netlify.com\npath=x/info/lfs\nusername=access-token\npassword=current\n"
    );
}

#[tokio::test]
async fn test_get_large_media_disabled() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(
        &tmp.path().join("netlify").join("config.json"),
        r#"{"access_token": "verysecret"}"#,
    );
    let mut capabilities = serde_json::Map::new();
    capabilities.insert("ssl".to_string(), serde_json::Value::Bool(true));
    let site = netlify_api::Site {
        capabilities: Some(capabilities),
        ..Default::default()
    };
    let api = Arc::new(MockApi::new().with_site("foo.netlify.app", "verysecret", site));
    let helper = CredentialHelper::with_api(HelperSettings::default(), paths_in(tmp.path()), api)
        .with_interactive(false);

    let err = get(&helper, "host=foo.netlify.app\n").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Netlify Large Media is not enabled for this site"
    );
}

#[tokio::test]
async fn test_get_logs_in_and_persists_token() {
    let tmp = tempfile::tempdir().unwrap();
    let api = Arc::new(
        MockApi::new()
            .with_large_media_site("foo.netlify.app", "fresh")
            .with_login("ticket-9", 1, "fresh"),
    );
    let browser = Arc::new(RecordingBrowser::default());
    let helper = CredentialHelper::with_api(HelperSettings::default(), paths_in(tmp.path()), api)
        .with_interactive(true)
        .with_browser(browser.clone())
        .with_poll_policy(fast_poll());

    let out = get(&helper, "host=foo.netlify.app\n").await.unwrap();
    assert!(out.contains("password=fresh\n"));
    assert_eq!(browser.opened().len(), 1);

    let content =
        std::fs::read_to_string(tmp.path().join("netlify").join("config.json")).unwrap();
    assert_eq!(
        StoredCredentials::from_json(&content).unwrap(),
        StoredCredentials::Token("fresh".to_string())
    );

    // Second run finds the stored token without another login
    let out = get(&helper, "host=foo.netlify.app\n").await.unwrap();
    assert!(out.contains("password=fresh\n"));
    assert_eq!(browser.opened().len(), 1);
}

#[test]
fn test_erase_is_best_effort() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    write_config(&tmp.path().join("netlify").join("config.json"), "{}");
    write_config(&tmp.path().join(".netlify").join("config"), "{}");

    let helper = CredentialHelper::with_api(
        HelperSettings::default(),
        paths.clone(),
        Arc::new(MockApi::new()),
    );
    commands::erase(&helper, "host=foo.netlify.app\n".as_bytes()).unwrap();

    for path in paths.iter() {
        assert!(!path.exists(), "{:?} should be gone", path);
    }
}
