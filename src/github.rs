use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, HeaderMap, LINK};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::StatsError;

const STARRED_PAGE_SIZE: u32 = 100;

/// Subset of `GET /users/{login}` the collector reads.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub followers: u64,
    pub following: u64,
    pub hireable: Option<bool>,
    pub public_gists: u64,
    pub public_repos: u64,
    // Only present for authenticated requests about the token owner.
    #[serde(default)]
    pub private_gists: Option<u64>,
    #[serde(default)]
    pub total_private_repos: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarredRepo {
    pub id: u64,
    pub full_name: String,
}

/// One page of a user's starred listing. `next` is the opaque cursor of the
/// following page, `None` on the last one.
#[derive(Debug, Clone, Default)]
pub struct StarredPage {
    pub items: Vec<StarredRepo>,
    pub next: Option<String>,
}

/// Where profiles and starred listings come from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, login: &str) -> Result<UserProfile>;

    /// Fetch the page addressed by `cursor`, or the first page when `None`.
    async fn starred_page(&self, login: &str, cursor: Option<&str>) -> Result<StarredPage>;
}

#[derive(Clone)]
pub struct GithubClient {
    config: Arc<Config>,
    http: Arc<Client>,
}

impl GithubClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            http: Arc::new(http),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url)
            .with_context(|| format!("Invalid GitHub API URL '{}'", self.config.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("GitHub API URL '{}' cannot be a base", self.config.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document, failing on any non-2xx status. No retry.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<(T, HeaderMap)> {
        let mut req = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Network error requesting {url}"))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        warn_if_rate_limited(&headers);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StatsError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            }
            .into());
        }

        let body = resp
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON from {url}"))?;
        Ok((body, headers))
    }
}

#[async_trait]
impl ProfileSource for GithubClient {
    async fn fetch_profile(&self, login: &str) -> Result<UserProfile> {
        let url = self.endpoint(&["users", login])?;
        let (profile, _) = self
            .get_json::<UserProfile>(url)
            .await
            .with_context(|| format!("Failed to fetch profile of '{login}'"))?;
        Ok(profile)
    }

    async fn starred_page(&self, login: &str, cursor: Option<&str>) -> Result<StarredPage> {
        let url = match cursor {
            Some(next) => Url::parse(next).with_context(|| format!("Invalid page link '{next}'"))?,
            None => {
                let mut url = self.endpoint(&["users", login, "starred"])?;
                url.query_pairs_mut()
                    .append_pair("per_page", &STARRED_PAGE_SIZE.to_string());
                url
            }
        };

        let (items, headers) = self
            .get_json::<Vec<StarredRepo>>(url)
            .await
            .with_context(|| format!("Failed to list starred repositories of '{login}'"))?;
        let next = next_link(&headers);
        debug!(login, items = items.len(), has_next = next.is_some(), "fetched starred page");

        Ok(StarredPage { items, next })
    }
}

fn warn_if_rate_limited(headers: &HeaderMap) {
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    if remaining == Some(0) {
        warn!("GitHub rate limit exhausted; further requests will be rejected until reset");
    }
}

/// Extract the `rel="next"` target from a `Link` header.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|p| p.trim().replace(' ', "") == "rel=\"next\"");
        if !is_next {
            return None;
        }
        let target = target.trim();
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
