use futures_util::StreamExt;
use octocrab::{models::repos::Release, Octocrab};
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::config::ReleaseConfig;
use crate::error::{Result, SetupError};

/// Anything that can list the names of published releases.
#[allow(async_fn_in_trait)]
pub trait ReleaseSource {
    /// Every release name across all pages, in the order the source returns
    /// them. Releases without a name are skipped.
    async fn release_names(&self) -> Result<Vec<String>>;
}

/// Release listing backed by the GitHub REST API.
pub struct GitHubReleases {
    release: ReleaseConfig,
    token: Option<String>,
}

impl GitHubReleases {
    pub fn new(release: ReleaseConfig, token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { release, token }
    }

    fn client(&self) -> Result<Octocrab> {
        let token = self.token.clone().ok_or_else(|| SetupError::MissingToken {
            owner: self.release.owner.clone(),
            repo: self.release.repo.clone(),
        })?;

        let octocrab = Octocrab::builder()
            .base_uri(self.release.api_url.as_str())?
            .personal_token(token)
            .build()?;
        Ok(octocrab)
    }
}

impl ReleaseSource for GitHubReleases {
    async fn release_names(&self) -> Result<Vec<String>> {
        let octocrab = self.client()?;
        let ReleaseConfig { owner, repo, .. } = &self.release;

        tracing::debug!("Listing releases of {}/{}", owner, repo);

        let mut page = octocrab
            .repos(owner, repo)
            .releases()
            .list()
            .per_page(100)
            .send()
            .await?;

        let mut names = Vec::new();
        loop {
            names.extend(
                page.items
                    .iter()
                    .filter_map(|release| release.name.clone())
                    .filter(|name| !name.is_empty()),
            );

            match octocrab.get_page::<Release>(&page.next).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        tracing::debug!("Found {} named releases", names.len());
        Ok(names)
    }
}

/// Plain HTTP client for release archives.
pub struct Downloader {
    http_client: Client,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        let http_client = Client::builder().user_agent("setup-forklift").build()?;
        Ok(Self { http_client })
    }

    /// Stream `url` into a new file at `dest`.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        tracing::info!("Downloading {}", url);

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        tracing::debug!("Saved {} to {}", url, dest.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn release_json(server: &MockServer, id: u64, name: Option<&str>) -> serde_json::Value {
        let repo_url = format!("{}/repos/PlanktoScope/forklift", server.uri());
        json!({
            "url": format!("{repo_url}/releases/{id}"),
            "html_url": format!("https://github.com/PlanktoScope/forklift/releases/{id}"),
            "assets_url": format!("{repo_url}/releases/{id}/assets"),
            "upload_url": format!("{repo_url}/releases/{id}/assets{{?name,label}}"),
            "tarball_url": null,
            "zipball_url": null,
            "id": id,
            "node_id": format!("RE_{id}"),
            "tag_name": format!("v{id}"),
            "target_commitish": "main",
            "name": name,
            "body": null,
            "draft": false,
            "prerelease": false,
            "created_at": "2024-01-01T00:00:00Z",
            "published_at": "2024-01-01T00:00:00Z",
            "author": {
                "login": "octocat",
                "id": 1,
                "node_id": "MDQ6VXNlcjE=",
                "avatar_url": "https://github.com/images/error/octocat_happy.gif",
                "gravatar_id": "",
                "url": "https://api.github.com/users/octocat",
                "html_url": "https://github.com/octocat",
                "followers_url": "https://api.github.com/users/octocat/followers",
                "following_url": "https://api.github.com/users/octocat/following{/other_user}",
                "gists_url": "https://api.github.com/users/octocat/gists{/gist_id}",
                "starred_url": "https://api.github.com/users/octocat/starred{/owner}{/repo}",
                "subscriptions_url": "https://api.github.com/users/octocat/subscriptions",
                "organizations_url": "https://api.github.com/users/octocat/orgs",
                "repos_url": "https://api.github.com/users/octocat/repos",
                "events_url": "https://api.github.com/users/octocat/events{/privacy}",
                "received_events_url": "https://api.github.com/users/octocat/received_events",
                "type": "User",
                "site_admin": false
            },
            "assets": []
        })
    }

    #[tokio::test]
    async fn test_listing_follows_pages() {
        let server = MockServer::start().await;
        let releases_path = "/repos/PlanktoScope/forklift/releases";

        // Mounted first so the page=2 request matches it before the catch-all
        Mock::given(method("GET"))
            .and(path(releases_path))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([release_json(&server, 3, Some("0.5.1"))])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let next = format!(
            "<{}{}?per_page=100&page=2>; rel=\"next\"",
            server.uri(),
            releases_path
        );
        Mock::given(method("GET"))
            .and(path(releases_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", next.as_str())
                    .set_body_json(json!([
                        release_json(&server, 1, Some("0.4.0")),
                        release_json(&server, 2, None),
                    ])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let release = ReleaseConfig {
            api_url: server.uri(),
            ..ReleaseConfig::default()
        };
        let names = GitHubReleases::new(release, Some("test-token".to_string()))
            .release_names()
            .await
            .unwrap();

        assert_eq!(names, vec!["0.4.0".to_string(), "0.5.1".to_string()]);
    }

    #[tokio::test]
    async fn test_listing_requires_token() {
        let releases = GitHubReleases::new(ReleaseConfig::default(), None);
        let err = releases.release_names().await.unwrap_err();
        assert!(matches!(err, SetupError::MissingToken { .. }));
        assert!(err.to_string().contains("PlanktoScope/forklift"));
    }

    #[tokio::test]
    async fn test_blank_token_counts_as_missing() {
        let releases = GitHubReleases::new(ReleaseConfig::default(), Some("  ".to_string()));
        let err = releases.release_names().await.unwrap_err();
        assert!(matches!(err, SetupError::MissingToken { .. }));
    }
}
