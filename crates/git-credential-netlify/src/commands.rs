//! Credential helper actions

use anyhow::Result;
use netlify_config::{AuthPaths, HelperSettings};
use netlify_credentials::CredentialHelper;
use std::io::{BufRead, Read, Write};

use crate::Action;

/// Run `action` with git's attributes on `input`, answering on `output`
pub async fn run<R: BufRead, W: Write>(
    action: Action,
    settings: HelperSettings,
    input: R,
    output: W,
) -> Result<()> {
    match action {
        Action::Version => version(output),
        Action::Store => store(input),
        Action::Get => {
            let helper = CredentialHelper::new(settings, AuthPaths::discover()?);
            get(&helper, input, output).await
        }
        Action::Erase => {
            let helper = CredentialHelper::new(settings, AuthPaths::discover()?);
            erase(&helper, input)
        }
    }
}

/// Fill in the Netlify access token for the requested host
pub async fn get<R: BufRead, W: Write>(
    helper: &CredentialHelper,
    input: R,
    output: W,
) -> Result<()> {
    helper.get(input, output).await?;
    Ok(())
}

/// Tokens are managed by the Netlify CLI and the login flow, not by git
pub fn store<R: Read>(input: R) -> Result<()> {
    drain(input)
}

/// Forget all stored Netlify credentials
pub fn erase<R: Read>(helper: &CredentialHelper, input: R) -> Result<()> {
    drain(input)?;
    let removed = helper.erase();
    tracing::debug!("Erased {} Netlify config file(s)", removed.len());
    Ok(())
}

pub fn version<W: Write>(mut output: W) -> Result<()> {
    writeln!(output, "{}", version_banner())?;
    Ok(())
}

/// `git-credential-netlify/<version> (Netlify; <os> <arch>; git <sha>)`
pub fn version_banner() -> String {
    let sha: String = option_env!("GIT_SHA")
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .chars()
        .take(8)
        .collect();

    format!(
        "git-credential-netlify/{} (Netlify; {} {}; git {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        sha
    )
}

/// git expects helpers to consume the whole request
fn drain<R: Read>(mut input: R) -> Result<()> {
    std::io::copy(&mut input, &mut std::io::sink())?;
    Ok(())
}
