//! # setup-forklift
//!
//! A CI pipeline step that installs a released binary of the Forklift CLI
//! and puts it on the runner's executable search path.
//!
//! ## Overview
//!
//! The requested version is resolved first. `latest` and `edge` are passed
//! straight to the download URL. Exact versions are cleaned. Semver ranges
//! are matched against the published releases. The matching archive for the
//! current host is downloaded into a fresh temporary directory, the binary is
//! extracted next to it and marked executable, and the directory is appended
//! to `$GITHUB_PATH`.
//!
//! ## Usage
//!
//! ```bash
//! # Install a specific version
//! setup-forklift --version-spec 0.5.0
//!
//! # Install the newest 0.5.x release
//! setup-forklift --version-spec '^0.5.0' --github-token "$GITHUB_TOKEN"
//! ```
//!
//! Inside a GitHub Action the same inputs are read from `INPUT_VERSION` and
//! `INPUT_GITHUB-TOKEN`.
//!
//! ## Configuration
//!
//! The release coordinates default to `PlanktoScope/forklift` on github.com
//! and can be overridden with a `[release]` table in
//! `~/.config/setup-forklift.toml` or the file given by `--config`.

/// Workflow-command logging, search-path publishing and failure reporting
pub mod actions;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Release listing and archive download
pub mod github;

/// Download, extraction and staging of the binary
pub mod installer;

/// Release archive URL and file names
pub mod planner;

/// Host OS and architecture tokens
pub mod platform;

/// Archive extraction and file permission helpers
pub mod utils;

/// Version specifier resolution
pub mod version;
