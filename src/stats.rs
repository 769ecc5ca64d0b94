use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::github::UserProfile;

/// One collected row: the public profile counters of a user plus the number
/// of repositories they starred.
///
/// Nullable fields are the ones GitHub only reports to authenticated callers
/// with enough visibility on the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub created_at: DateTime<Utc>,
    pub followers: u64,
    pub following: u64,
    pub hireable: Option<bool>,
    pub login: String,
    pub name: Option<String>,
    pub private_gists: Option<u64>,
    pub public_gists: u64,
    pub public_repos: u64,
    pub total_private_repos: Option<u64>,
    pub starred: u64,
}

impl UserStats {
    /// Build a record from a fetched profile and its starred count.
    pub fn from_profile(profile: UserProfile, starred: u64) -> Result<Self, StatsError> {
        let stats = Self {
            created_at: profile.created_at,
            followers: profile.followers,
            following: profile.following,
            hireable: profile.hireable,
            login: profile.login,
            name: profile.name,
            private_gists: profile.private_gists,
            public_gists: profile.public_gists,
            public_repos: profile.public_repos,
            total_private_repos: profile.total_private_repos,
            starred,
        };
        stats.validate()?;
        Ok(stats)
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if self.login.trim().is_empty() {
            return Err(StatsError::InvalidRecord("login must not be empty".into()));
        }
        Ok(())
    }
}
