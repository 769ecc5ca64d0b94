//! In-memory stand-in for the GitHub API and log capture used by unit tests.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::github::{ProfileSource, StarredPage, StarredRepo, UserProfile};
use crate::stats::UserStats;

pub fn profile(login: &str, followers: u64) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        name: None,
        created_at: Utc.with_ymd_and_hms(2015, 3, 1, 12, 0, 0).unwrap(),
        followers,
        following: 1,
        hireable: None,
        public_gists: 0,
        public_repos: 4,
        private_gists: None,
        total_private_repos: None,
    }
}

pub fn record(login: &str, name: Option<&str>) -> UserStats {
    UserStats::from_profile(
        UserProfile {
            name: name.map(str::to_string),
            ..profile(login, 3)
        },
        7,
    )
    .unwrap()
}

/// Serves fixed profiles and a synthetic starred listing split into pages.
pub struct StubSource {
    page_size: usize,
    users: HashMap<String, (UserProfile, usize)>,
    profile_requests: Mutex<Vec<String>>,
    page_requests: Mutex<HashMap<String, usize>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            page_size: 100,
            users: HashMap::new(),
            profile_requests: Mutex::new(Vec::new()),
            page_requests: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_user(self, login: &str, followers: u64, starred: usize) -> Self {
        self.with_profile(profile(login, followers), starred)
    }

    pub fn with_profile(mut self, profile: UserProfile, starred: usize) -> Self {
        self.users.insert(profile.login.clone(), (profile, starred));
        self
    }

    pub fn fetched_logins(&self) -> Vec<String> {
        self.profile_requests.lock().unwrap().clone()
    }

    pub fn page_requests(&self, login: &str) -> usize {
        self.page_requests
            .lock()
            .unwrap()
            .get(login)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ProfileSource for StubSource {
    async fn fetch_profile(&self, login: &str) -> Result<UserProfile> {
        self.profile_requests.lock().unwrap().push(login.to_string());
        self.users
            .get(login)
            .map(|(profile, _)| profile.clone())
            .ok_or_else(|| anyhow!("GitHub API returned HTTP 404 for user '{login}'"))
    }

    async fn starred_page(&self, login: &str, cursor: Option<&str>) -> Result<StarredPage> {
        let (_, total) = self
            .users
            .get(login)
            .ok_or_else(|| anyhow!("GitHub API returned HTTP 404 for user '{login}'"))?;
        *self
            .page_requests
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default() += 1;

        let page: usize = cursor.map(str::parse::<usize>).transpose()?.unwrap_or(0);
        let start = page * self.page_size;
        let end = (start + self.page_size).min(*total);
        let items = (start..end)
            .map(|i| StarredRepo {
                id: i as u64,
                full_name: format!("{login}/starred-{i}"),
            })
            .collect();
        let next = (end < *total).then(|| (page + 1).to_string());

        Ok(StarredPage { items, next })
    }
}

/// Log output collected by a thread-local subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Route events on the current thread into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let captured = CapturedLogs::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}
