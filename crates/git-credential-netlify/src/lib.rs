//! git-credential-netlify - git credential helper for Netlify Large Media

pub mod commands;
pub mod logging;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

pub const USAGE: &str = "Usage: git-credential-netlify <get|store|erase|version>";

#[derive(Parser, Debug)]
#[command(name = "git-credential-netlify")]
#[command(about = "Git credential helper for Netlify Large Media", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Credential action requested by git
    #[arg(value_enum)]
    pub action: Option<Action>,

    /// Print version information
    #[arg(long)]
    pub version: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Print credentials for the host read from stdin
    Get,
    /// Accepted and ignored
    Store,
    /// Remove stored Netlify credentials
    Erase,
    /// Print version information
    Version,
}

impl Cli {
    /// The action to run; `--version` counts as `version`
    pub fn action(&self) -> Result<Action> {
        match (self.action, self.version) {
            (Some(action), false) => Ok(action),
            (None, true) | (Some(Action::Version), true) => Ok(Action::Version),
            _ => Err(anyhow!(USAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("git-credential-netlify").chain(args.iter().copied()))
    }

    #[test]
    fn test_actions() {
        assert_eq!(parse(&["get"]).unwrap().action().unwrap(), Action::Get);
        assert_eq!(parse(&["store"]).unwrap().action().unwrap(), Action::Store);
        assert_eq!(parse(&["erase"]).unwrap().action().unwrap(), Action::Erase);
        assert_eq!(parse(&["version"]).unwrap().action().unwrap(), Action::Version);
        assert_eq!(parse(&["--version"]).unwrap().action().unwrap(), Action::Version);
    }

    #[test]
    fn test_missing_action_is_usage_error() {
        let err = parse(&[]).unwrap().action().unwrap_err();
        assert_eq!(err.to_string(), USAGE);
    }

    #[test]
    fn test_conflicting_action_is_usage_error() {
        assert!(parse(&["get", "--version"]).unwrap().action().is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&["get", "extra"]).is_err());
    }
}
