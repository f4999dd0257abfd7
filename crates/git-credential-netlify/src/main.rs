//! git-credential-netlify - git credential helper for Netlify Large Media

use clap::error::ErrorKind;
use clap::Parser;
use git_credential_netlify::{commands, logging, Cli};
use netlify_config::HelperSettings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let settings = HelperSettings::from_env();
    let _log_guard = logging::init(&settings);

    if let Err(e) = run(cli, settings).await {
        tracing::debug!("Aborting Netlify credential helper execution");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, settings: HelperSettings) -> anyhow::Result<()> {
    tracing::debug!(
        "Initializing Netlify credential helper: {:?}",
        std::env::args().collect::<Vec<_>>()
    );

    let action = cli.action()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    commands::run(action, settings, stdin.lock(), stdout.lock()).await
}
