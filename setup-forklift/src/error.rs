use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("GitHub API error: {0}")]
    GitHubApi(#[from] octocrab::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input required and not supplied: github-token (needed to list releases of {owner}/{repo})")]
    MissingToken { owner: String, repo: String },

    #[error("Configuration error at {path}: {message}")]
    Config { path: String, message: String },

    #[error("Unable to resolve version '{specifier}': {reason}")]
    UnresolvedVersion { specifier: String, reason: String },

    #[error("Failed to download {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Unable to extract {archive} to {target}: {reason}")]
    ArchiveExtraction {
        archive: String,
        target: String,
        reason: String,
    },

    #[error("Unable to move {from} to {to}: {source}")]
    Relocation {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to publish {dir} to the search path: {source}")]
    PublishPath {
        dir: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SetupError>;
