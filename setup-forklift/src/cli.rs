use clap::Parser;
use std::path::PathBuf;

/// Inputs come from flags or, when run as a GitHub Action, from the
/// `INPUT_*` variables the runner sets for each action input.
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "setup-forklift",
    version,
    about = "Install the Forklift CLI from GitHub Releases and add it to the PATH",
    long_about = None
)]
pub struct Args {
    /// Version to install: exact version, semver range, `latest` or `edge`
    #[clap(long, value_name = "VERSION", env = "INPUT_VERSION")]
    pub version_spec: String,

    /// Token for listing releases (only needed for range specifiers)
    #[clap(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Fail instead of attempting a download when the version does not resolve
    #[clap(long, env = "INPUT_STRICT", value_parser = clap::builder::FalseyValueParser::new())]
    pub strict: bool,

    /// Directory to create the download workspace in
    #[clap(long, env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// File the runner reads search-path additions from
    #[clap(long, env = "GITHUB_PATH")]
    pub github_path: Option<PathBuf>,

    /// Emit log lines as workflow commands
    #[clap(long, env = "GITHUB_ACTIONS", value_parser = clap::builder::FalseyValueParser::new())]
    pub github_actions: bool,

    /// Configuration file path
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

impl Args {
    /// Version specifier with surrounding whitespace removed
    pub fn version_spec(&self) -> &str {
        self.version_spec.trim()
    }

    /// Token with blank values treated as absent
    pub fn github_token(&self) -> Option<String> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    /// Parent directory for the workspace, defaulting to the system temp dir
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(std::env::temp_dir)
    }
}
