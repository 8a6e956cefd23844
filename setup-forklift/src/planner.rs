use crate::config::ReleaseConfig;
use crate::platform::Host;
use crate::version::Channel;

/// Where to fetch a release archive and what to expect inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    pub url: String,
    pub archive_name: String,
    pub binary_name: String,
}

/// Compute the download for `version` on `host`.
///
/// Channel markers go into the URL as-is; anything else is treated as a
/// version and gets a `v` prefix. The URL is not checked for existence.
pub fn plan(release: &ReleaseConfig, host: &Host, version: &str) -> DownloadDescriptor {
    let vsn = match Channel::parse(version) {
        Some(channel) => channel.as_str().to_string(),
        None => format!("v{version}"),
    };

    // forklift_0.5.0_linux_amd64
    let filename = format!(
        "{}_{}_{}_{}",
        release.tool,
        version,
        host.vendor_os(),
        host.vendor_arch()
    );

    let (archive_name, binary_name) = if host.is_windows() {
        (format!("{filename}.zip"), format!("{}.zip", release.tool))
    } else {
        (format!("{filename}.tar.gz"), release.tool.clone())
    };

    let url = format!(
        "{}/{}/{}/releases/download/{}/{}",
        release.server_url.trim_end_matches('/'),
        release.owner,
        release.repo,
        vsn,
        archive_name
    );

    DownloadDescriptor {
        url,
        archive_name,
        binary_name,
    }
}
