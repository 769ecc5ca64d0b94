use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::github::ProfileSource;
use crate::starred::count_starred;
use crate::stats::UserStats;

/// Fetch stats for every login, sequentially and in input order.
///
/// The first failing request aborts the whole collection.
pub async fn collect<S>(source: &S, logins: &[String]) -> Result<Vec<UserStats>>
where
    S: ProfileSource + ?Sized,
{
    info!("Fetching {} users from GitHub", logins.len());

    let mut users = Vec::with_capacity(logins.len());
    for login in logins {
        users.push(collect_user(source, login).await?);
    }

    Ok(users)
}

async fn collect_user<S>(source: &S, login: &str) -> Result<UserStats>
where
    S: ProfileSource + ?Sized,
{
    let profile = source.fetch_profile(login).await?;
    let starred = count_starred(source, login).await?;
    debug!(login, followers = profile.followers, starred, "collected user");

    UserStats::from_profile(profile, starred)
        .with_context(|| format!("GitHub returned an unusable profile for '{login}'"))
}
