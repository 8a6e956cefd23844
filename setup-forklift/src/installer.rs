use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ReleaseConfig;
use crate::error::{Result, SetupError};
use crate::github::{Downloader, ReleaseSource};
use crate::planner::{self, DownloadDescriptor};
use crate::platform::Host;
use crate::utils;
use crate::version::{self, Resolution};

/// A finished installation.
#[derive(Debug, Clone)]
pub struct Installed {
    pub resolution: Resolution,
    /// Workspace directory to put on the search path
    pub dir: PathBuf,
    pub binary: PathBuf,
}

pub struct Installer {
    release: ReleaseConfig,
    host: Host,
    temp_root: PathBuf,
    strict: bool,
    downloader: Downloader,
}

impl Installer {
    pub fn new(release: ReleaseConfig, host: Host, temp_root: PathBuf) -> Result<Self> {
        Ok(Self {
            release,
            host,
            temp_root,
            strict: false,
            downloader: Downloader::new()?,
        })
    }

    /// Fail on specifiers that resolve to nothing instead of trying the
    /// download anyway.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve `specifier`, then download and stage the binary.
    pub async fn run<S: ReleaseSource>(&self, specifier: &str, source: &S) -> Result<Installed> {
        let resolution = version::resolve(specifier, source).await?;

        if let Resolution::Unresolved { specifier, reason } = &resolution {
            if self.strict {
                return Err(SetupError::UnresolvedVersion {
                    specifier: specifier.clone(),
                    reason: reason.to_string(),
                });
            }
        }

        let download = planner::plan(&self.release, &self.host, resolution.version());
        let dir = self.install(&download).await?;
        let binary = dir.join(&download.binary_name);

        Ok(Installed {
            resolution,
            dir,
            binary,
        })
    }

    /// Download and unpack `download` into a fresh workspace, returning the
    /// workspace path. The workspace is left on disk.
    pub async fn install(&self, download: &DownloadDescriptor) -> Result<PathBuf> {
        let workspace = create_workspace(&self.temp_root)?;
        tracing::debug!("Created workspace {}", workspace.display());

        self.downloader
            .download(&download.url, &workspace.join(&download.archive_name))
            .await?;

        self.extract_binary(&workspace, download)?;

        let binary = workspace.join(&download.binary_name);
        utils::make_executable(&binary)?;

        Ok(workspace)
    }

    /// Unpack the archive and move the binary up to the workspace root.
    fn extract_binary(&self, workspace: &Path, download: &DownloadDescriptor) -> Result<()> {
        let archive_path = workspace.join(&download.archive_name);
        let extracted_path = workspace.join(format!("{}-release", self.release.tool));
        let binary_from = extracted_path.join(&download.binary_name);
        let binary_to = workspace.join(&download.binary_name);

        tracing::debug!(
            "Extracting {} to {}...",
            archive_path.display(),
            extracted_path.display()
        );
        if let Err(e) = utils::extract_archive(&archive_path, &extracted_path) {
            tracing::error!(
                "Unable to extract {} to {}.",
                archive_path.display(),
                extracted_path.display()
            );
            return Err(e);
        }

        tracing::debug!(
            "Moving {} to {}...",
            binary_from.display(),
            binary_to.display()
        );
        if let Err(source) = fs::rename(&binary_from, &binary_to) {
            tracing::error!(
                "Unable to move {} to {}.",
                binary_from.display(),
                binary_to.display()
            );
            return Err(SetupError::Relocation {
                from: binary_from.display().to_string(),
                to: binary_to.display().to_string(),
                source,
            });
        }

        Ok(())
    }
}

/// Create a uniquely named directory under `temp_root` that outlives this
/// process.
fn create_workspace(temp_root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(temp_root)?;
    let dir = tempfile::Builder::new()
        .prefix("tmp")
        .disable_cleanup(true)
        .tempdir_in(temp_root)?;
    Ok(dir.path().to_path_buf())
}
