//! Talking to the CI runner: workflow-command logging, search-path
//! publishing and failure reporting.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, SetupError};

/// Renders tracing events as GitHub Actions workflow commands.
///
/// ERROR and WARN become `::error::` and `::warning::` annotations, DEBUG
/// and TRACE become `::debug::` lines (hidden unless step debugging is on),
/// INFO is printed as a plain line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowCommands;

impl<S, N> FormatEvent<S, N> for WorkflowCommands
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(format::Writer::new(&mut message), event)?;

        match *event.metadata().level() {
            Level::ERROR => writeln!(writer, "::error::{}", escape_data(&message)),
            Level::WARN => writeln!(writer, "::warning::{}", escape_data(&message)),
            Level::INFO => writeln!(writer, "{message}"),
            _ => writeln!(writer, "::debug::{}", escape_data(&message)),
        }
    }
}

/// Escape a workflow command payload.
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise this crate logs at `info`, or at
/// `debug` with `verbose` or inside Actions, where the runner hides debug
/// lines itself. Dependencies only log warnings.
pub fn init_tracing(github_actions: bool, verbose: bool) {
    let default_level = if verbose || github_actions {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,setup_forklift={default_level}")));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if github_actions {
        builder.event_format(WorkflowCommands).init();
    } else {
        builder.init();
    }
}

/// Publishes directories on the runner's executable search path.
#[derive(Debug, Clone)]
pub struct PathPublisher {
    github_path: Option<PathBuf>,
}

impl PathPublisher {
    /// `github_path` is the runner's path file (`$GITHUB_PATH`). Without
    /// one, the `add-path` workflow command is printed instead.
    pub fn new(github_path: Option<PathBuf>) -> Self {
        let github_path = github_path.filter(|p| !p.as_os_str().is_empty());
        Self { github_path }
    }

    pub fn publish(&self, dir: &Path) -> Result<()> {
        match &self.github_path {
            Some(path_file) => {
                tracing::debug!("Adding {} to {}", dir.display(), path_file.display());
                append_line(path_file, &dir.display().to_string()).map_err(|source| {
                    SetupError::PublishPath {
                        dir: dir.display().to_string(),
                        source,
                    }
                })
            }
            None => {
                println!("::add-path::{}", escape_data(&dir.display().to_string()));
                Ok(())
            }
        }
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// Report a failed run. The caller is expected to exit non-zero.
pub fn set_failed(err: &anyhow::Error) {
    tracing::error!("{:#}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
    }

    #[test]
    fn test_publish_appends_to_path_file() {
        let dir = tempdir().unwrap();
        let path_file = dir.path().join("github_path");
        fs::write(&path_file, "/opt/existing\n").unwrap();

        let publisher = PathPublisher::new(Some(path_file.clone()));
        publisher.publish(Path::new("/tmp/tmpAbC123")).unwrap();

        assert_eq!(
            fs::read_to_string(&path_file).unwrap(),
            "/opt/existing\n/tmp/tmpAbC123\n"
        );
    }

    #[test]
    fn test_publish_creates_path_file() {
        let dir = tempdir().unwrap();
        let path_file = dir.path().join("github_path");

        PathPublisher::new(Some(path_file.clone()))
            .publish(Path::new("/tmp/tmpXyZ"))
            .unwrap();

        assert_eq!(fs::read_to_string(&path_file).unwrap(), "/tmp/tmpXyZ\n");
    }

    #[test]
    fn test_publish_reports_unwritable_path_file() {
        let dir = tempdir().unwrap();
        let path_file = dir.path().join("missing").join("github_path");

        let err = PathPublisher::new(Some(path_file))
            .publish(Path::new("/tmp/tmpXyZ"))
            .unwrap_err();
        assert!(matches!(err, SetupError::PublishPath { .. }));
    }

    #[test]
    fn test_empty_path_file_falls_back_to_command() {
        let publisher = PathPublisher::new(Some(PathBuf::new()));
        assert!(publisher.github_path.is_none());
        publisher.publish(Path::new("/tmp/tmpXyZ")).unwrap();
    }
}
