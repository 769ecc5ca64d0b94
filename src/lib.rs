//! Collect public GitHub profile stats for a list of users into a JSON lines
//! file, and render such a file into an HTML report.

pub mod collect;
pub mod config;
pub mod error;
pub mod github;
pub mod jsonl;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod starred;
pub mod stats;

#[cfg(test)]
mod test_helpers;

pub use config::Config;
pub use error::StatsError;
pub use github::{GithubClient, ProfileSource, StarredPage, StarredRepo, UserProfile};
pub use stats::UserStats;
