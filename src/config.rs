pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const USER_AGENT: &str = concat!("github-user-stats/", env!("CARGO_PKG_VERSION"));

/// Settings for talking to the GitHub REST API.
#[derive(Debug, Clone)]
pub struct Config {
    // From GITHUB_TOKEN, optional bearer token
    pub token: Option<String>,

    // From GITHUB_API_URL, default https://api.github.com
    pub api_url: String,

    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let token = lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty());
        let api_url = lookup("GITHUB_API_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            token,
            ..Self::default()
        }
        .with_api_url(api_url)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
