use semver::{Version, VersionReq};
use std::fmt;

use crate::error::Result;
use crate::github::ReleaseSource;

/// Version aliases that the archive host resolves on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Latest,
    Edge,
}

impl Channel {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "latest" => Some(Channel::Latest),
            "edge" => Some(Channel::Edge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Latest => "latest",
            Channel::Edge => "edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    NoMatchingRelease,
    InvalidSpecifier,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoMatchingRelease => f.write_str("did not match any release version"),
            UnresolvedReason::InvalidSpecifier => f.write_str("is not a valid version or range"),
        }
    }
}

/// Outcome of resolving a version specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `latest` or `edge`, passed through to the download URL.
    Channel(Channel),
    /// The specifier was already an exact version.
    Exact(String),
    /// Highest published release satisfying a range.
    RangeMatched { range: String, version: String },
    /// Nothing matched; the original specifier is kept so the download
    /// step is the one that fails.
    Unresolved {
        specifier: String,
        reason: UnresolvedReason,
    },
}

impl Resolution {
    /// The version string used to build the download URL.
    pub fn version(&self) -> &str {
        match self {
            Resolution::Channel(channel) => channel.as_str(),
            Resolution::Exact(version) => version,
            Resolution::RangeMatched { version, .. } => version,
            Resolution::Unresolved { specifier, .. } => specifier,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved { .. })
    }
}

/// Parse a version the way release names and user input are written,
/// tolerating surrounding whitespace and leading `=`/`v`.
pub fn parse_version(input: &str) -> Option<Version> {
    let trimmed = input.trim().trim_start_matches(['=', 'v']);
    Version::parse(trimmed).ok()
}

/// Canonical `MAJOR.MINOR.PATCH[-PRE]` form. Build metadata is dropped.
pub fn canonical(version: &Version) -> String {
    if version.pre.is_empty() {
        format!("{}.{}.{}", version.major, version.minor, version.patch)
    } else {
        format!(
            "{}.{}.{}-{}",
            version.major, version.minor, version.patch, version.pre
        )
    }
}

/// Clean an exact version string, or `None` if it is not one.
pub fn clean_version(input: &str) -> Option<String> {
    parse_version(input).map(|v| canonical(&v))
}

/// A semver range, possibly a union of `||`-separated alternatives.
#[derive(Debug, Clone)]
pub struct VersionRange {
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    pub fn parse(input: &str) -> Option<Self> {
        if input.trim().is_empty() {
            return None;
        }

        let alternatives = input
            .split("||")
            .map(|alt| VersionReq::parse(&normalize_alternative(alt)).ok())
            .collect::<Option<Vec<_>>>()?;

        Some(Self { alternatives })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// Highest version among `names` that satisfies the range. Names that
    /// are not versions are skipped.
    pub fn max_satisfying<S: AsRef<str>>(&self, names: &[S]) -> Option<Version> {
        names
            .iter()
            .filter_map(|name| parse_version(name.as_ref()))
            .filter(|version| self.matches(version))
            .max()
    }
}

/// Turn one range alternative into the comma-separated comparator list the
/// `semver` crate expects.
fn normalize_alternative(alt: &str) -> String {
    let alt = alt.trim();
    if alt.is_empty() {
        // `1.0.0 ||` allows anything on its empty side
        return "*".to_string();
    }

    let comparators: Vec<String> = if alt.contains(',') {
        alt.split(',').map(|c| normalize_comparator(c.trim())).collect()
    } else {
        // ">= 1.2 < 2" style: glue bare operators to the version after them
        let mut glued: Vec<String> = Vec::new();
        let mut pending_op = String::new();
        for token in alt.split_whitespace() {
            if token.chars().all(is_operator_char) {
                pending_op.push_str(token);
            } else {
                glued.push(normalize_comparator(&format!("{pending_op}{token}")));
                pending_op.clear();
            }
        }
        if !pending_op.is_empty() {
            glued.push(pending_op);
        }
        glued
    };

    comparators.join(", ")
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '~' | '^')
}

/// A bare partial version such as `0.5` means `0.5.x`, which the `semver`
/// crate spells `=0.5`.
fn normalize_comparator(token: &str) -> String {
    let split = token
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(token.len());
    let (op, rest) = token.split_at(split);
    let rest = rest.strip_prefix('v').unwrap_or(rest);

    let numeric = rest.split(['-', '+']).next().unwrap_or("");
    let has_wildcard = numeric.contains(['*', 'x', 'X']);

    if op.is_empty() && rest.starts_with(|c: char| c.is_ascii_digit()) && !has_wildcard {
        format!("={rest}")
    } else {
        format!("{op}{rest}")
    }
}

/// Resolve a user-supplied version specifier.
///
/// Only range specifiers consult `source`. A specifier that matches nothing
/// yields [`Resolution::Unresolved`] with a warning rather than an error.
pub async fn resolve<S: ReleaseSource>(specifier: &str, source: &S) -> Result<Resolution> {
    if let Some(channel) = Channel::parse(specifier) {
        tracing::debug!("Using release channel {}", channel.as_str());
        return Ok(Resolution::Channel(channel));
    }

    if let Some(version) = clean_version(specifier) {
        tracing::debug!("Using exact version {}", version);
        return Ok(Resolution::Exact(version));
    }

    let reason = match VersionRange::parse(specifier) {
        Some(range) => {
            let names = source.release_names().await?;
            tracing::debug!("Matching {} against {} releases", specifier, names.len());

            if let Some(max) = range.max_satisfying(&names) {
                let version = canonical(&max);
                tracing::debug!("{} resolved to {}", specifier, version);
                return Ok(Resolution::RangeMatched {
                    range: specifier.to_string(),
                    version,
                });
            }
            UnresolvedReason::NoMatchingRelease
        }
        None => UnresolvedReason::InvalidSpecifier,
    };

    tracing::warn!("{} {}.", specifier, reason);
    Ok(Resolution::Unresolved {
        specifier: specifier.to_string(),
        reason,
    })
}
