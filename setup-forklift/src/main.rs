use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use setup_forklift::actions::{self, PathPublisher};
use setup_forklift::cli::Args;
use setup_forklift::config::Config;
use setup_forklift::github::GitHubReleases;
use setup_forklift::installer::Installer;
use setup_forklift::platform::Host;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    actions::init_tracing(args.github_actions, args.verbose);

    match setup(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            actions::set_failed(&e);
            ExitCode::FAILURE
        }
    }
}

async fn setup(args: Args) -> Result<()> {
    let config =
        Config::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;

    let host = Host::detect();
    tracing::debug!("Detected host {}/{}", host.os, host.arch);

    let releases = GitHubReleases::new(config.release.clone(), args.github_token());
    let installer = Installer::new(config.release.clone(), host, args.temp_dir())?.strict(args.strict);

    let installed = installer.run(args.version_spec(), &releases).await?;

    PathPublisher::new(args.github_path.clone()).publish(&installed.dir)?;

    tracing::info!(
        "Setup Forklift CLI version {}",
        installed.resolution.version()
    );
    Ok(())
}
