//! Netlify config file locations
//!
//! The Netlify CLI has stored its config in several places over the years.
//! `AuthPaths` lists them in priority order; only the first one that opens is
//! ever read, and only the first one is ever written.

use crate::{ConfigError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Operating system family, as far as config locations are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other XDG-style Unix systems
    Unix,
    MacOs,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    /// Directory the Netlify CLI treats as its config root.
    ///
    /// `lookup` resolves environment variables so callers can substitute a
    /// fixed environment in tests.
    pub fn config_home<F>(self, home: &Path, lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.is_empty()).map(PathBuf::from);
        match self {
            Platform::Unix => non_empty("XDG_CONFIG_HOME")
                .filter(|p| p.is_absolute())
                .unwrap_or_else(|| home.join(".config")),
            // Mirrors the Node.js env-paths layout the Netlify CLI writes with
            Platform::MacOs => home.join("Library").join("Preferences"),
            Platform::Windows => {
                non_empty("APPDATA").unwrap_or_else(|| home.join("AppData").join("Roaming"))
            }
        }
    }
}

/// Ordered candidate paths for the Netlify config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPaths {
    paths: Vec<PathBuf>,
}

impl AuthPaths {
    /// Build the candidate list for the running system
    pub fn discover() -> Result<Self> {
        let home = home_dir().ok_or(ConfigError::NoHomeDir)?;
        let platform = Platform::current();
        let config_home = platform.config_home(&home, |var| std::env::var(var).ok());
        Ok(Self::new(platform, &home, &config_home))
    }

    /// Build the candidate list from explicit directories
    pub fn new(platform: Platform, home: &Path, config_home: &Path) -> Self {
        let primary = match platform {
            Platform::Windows => config_home.join("netlify").join("Config").join("config.json"),
            Platform::Unix | Platform::MacOs => config_home.join("netlify").join("config.json"),
        };

        let paths = vec![
            primary,
            home.join(".netlify").join("config.json"),
            home.join(".config").join("netlify"),
            home.join(".netlify").join("config"),
            home.join(".config").join("netlify.json"),
        ];

        Self {
            paths: dedup_paths(paths),
        }
    }

    /// Use exactly the given paths, in order. The first one is the primary.
    ///
    /// # Panics
    ///
    /// Panics if `paths` is empty.
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        assert!(!paths.is_empty(), "AuthPaths needs at least one candidate");
        Self {
            paths: dedup_paths(paths),
        }
    }

    /// The path new tokens are written to. Never empty: both constructors
    /// produce at least one candidate.
    pub fn primary(&self) -> &Path {
        &self.paths[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Open the first candidate that is a readable regular file.
    ///
    /// Directories are skipped: `~/.config/netlify` is both a legacy config
    /// file name and the parent of the primary path. Later candidates are
    /// never consulted once one opens, even if its contents turn out to be
    /// useless.
    pub fn open_first(&self) -> Option<(PathBuf, File)> {
        for path in &self.paths {
            match open_regular_file(path) {
                Ok(Some(file)) => {
                    tracing::debug!("Using Netlify config at {:?}", path);
                    return Some((path.clone(), file));
                }
                Ok(None) => {
                    tracing::debug!("Skipping Netlify config candidate {:?}: not a file", path);
                }
                Err(e) => {
                    tracing::debug!("Skipping Netlify config candidate {:?}: {}", path, e);
                }
            }
        }
        None
    }
}

/// `Ok(None)` when `path` opens but is not a regular file
fn open_regular_file(path: &Path) -> std::io::Result<Option<File>> {
    let file = File::open(path)?;
    if file.metadata()?.is_file() {
        Ok(Some(file))
    } else {
        Ok(None)
    }
}

fn home_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        let p = PathBuf::from(home);
        if !p.as_os_str().is_empty() {
            return Some(p);
        }
    }
    directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf())
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for p in paths {
        if seen.insert(p.clone()) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_unix_candidates_in_priority_order() {
        let home = Path::new("/home/dev");
        let config_home = Platform::Unix.config_home(home, no_env);
        let paths = AuthPaths::new(Platform::Unix, home, &config_home);

        let listed: Vec<_> = paths.iter().map(Path::to_path_buf).collect();
        assert_eq!(
            listed,
            vec![
                PathBuf::from("/home/dev/.config/netlify/config.json"),
                PathBuf::from("/home/dev/.netlify/config.json"),
                PathBuf::from("/home/dev/.config/netlify"),
                PathBuf::from("/home/dev/.netlify/config"),
                PathBuf::from("/home/dev/.config/netlify.json"),
            ]
        );
        assert_eq!(
            paths.primary(),
            Path::new("/home/dev/.config/netlify/config.json")
        );
    }

    #[test]
    fn test_unix_respects_xdg_config_home() {
        let home = Path::new("/home/dev");
        let config_home = Platform::Unix.config_home(home, |var| {
            (var == "XDG_CONFIG_HOME").then(|| "/xdg".to_string())
        });
        let paths = AuthPaths::new(Platform::Unix, home, &config_home);
        assert_eq!(paths.primary(), Path::new("/xdg/netlify/config.json"));
    }

    #[test]
    fn test_unix_ignores_relative_xdg_config_home() {
        let home = Path::new("/home/dev");
        let config_home = Platform::Unix.config_home(home, |var| {
            (var == "XDG_CONFIG_HOME").then(|| "relative/dir".to_string())
        });
        assert_eq!(config_home, PathBuf::from("/home/dev/.config"));
    }

    #[test]
    fn test_macos_primary_path() {
        let home = Path::new("/Users/dev");
        let config_home = Platform::MacOs.config_home(home, no_env);
        let paths = AuthPaths::new(Platform::MacOs, home, &config_home);
        assert_eq!(
            paths.primary(),
            Path::new("/Users/dev/Library/Preferences/netlify/config.json")
        );
        assert_eq!(paths.iter().count(), 5);
    }

    #[test]
    fn test_windows_primary_path_uses_appdata() {
        let home = Path::new("/c/Users/dev");
        let with_appdata = Platform::Windows.config_home(home, |var| {
            (var == "APPDATA").then(|| "/c/roaming".to_string())
        });
        let paths = AuthPaths::new(Platform::Windows, home, &with_appdata);
        assert_eq!(
            paths.primary(),
            Path::new("/c/roaming/netlify/Config/config.json")
        );

        let fallback = Platform::Windows.config_home(home, no_env);
        assert_eq!(fallback, PathBuf::from("/c/Users/dev/AppData/Roaming"));
    }

    #[test]
    fn test_duplicate_candidates_are_removed() {
        let paths = AuthPaths::from_paths(vec![
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            PathBuf::from("/a"),
        ]);
        assert_eq!(paths.iter().count(), 2);
        assert_eq!(paths.primary(), Path::new("/a"));
    }

    #[test]
    fn test_open_first_skips_missing_files() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("missing.json");
        let second = tmp.path().join("second.json");
        let third = tmp.path().join("third.json");
        std::fs::write(&second, "{}").unwrap();
        std::fs::write(&third, "{}").unwrap();

        let paths = AuthPaths::from_paths(vec![missing, second.clone(), third]);
        let (path, _file) = paths.open_first().expect("second candidate should open");
        assert_eq!(path, second);
    }

    #[test]
    fn test_open_first_skips_directories() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("netlify");
        let legacy = tmp.path().join("legacy.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&legacy, "{}").unwrap();

        let paths = AuthPaths::from_paths(vec![dir.clone()]);
        assert!(paths.open_first().is_none());

        let paths = AuthPaths::from_paths(vec![dir, legacy.clone()]);
        let (path, _file) = paths.open_first().expect("legacy file should open");
        assert_eq!(path, legacy);
    }

    #[test]
    #[should_panic(expected = "at least one candidate")]
    fn test_from_paths_rejects_empty_list() {
        AuthPaths::from_paths(Vec::new());
    }

    #[test]
    fn test_open_first_none_when_nothing_exists() {
        let tmp = tempdir().unwrap();
        let paths = AuthPaths::from_paths(vec![tmp.path().join("nope.json")]);
        assert!(paths.open_first().is_none());
    }
}
