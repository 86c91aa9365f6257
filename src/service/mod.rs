// Roster service.
// Read-through caching aggregation over one GitHub organization's
// repositories, contributors, and file trees.

mod catalog;
mod contributors;
mod outcome;
mod paths;

pub use outcome::{Coverage, Fetched, Lookup};

use crate::cache::{ExpiryPolicy, Slot};
use crate::config::OrgConfig;
use crate::github::{Contributor, GitHubClient, Repository};

/// Cache key for the filtered repository catalog.
const REPOSITORIES_KEY: &str = "repositories";

/// Cache key for the aggregated contributor list.
const CONTRIBUTORS_KEY: &str = "contributors";

/// Cached query surface for one GitHub organization.
///
/// All queries return a [`Fetched`] (or [`Lookup`]) describing the payload
/// and its coverage; none of them raise on ordinary upstream failure.
pub struct Roster {
    client: GitHubClient,
    config: OrgConfig,
    repo_cache: Slot<Vec<Repository>>,
    contributor_cache: Slot<Fetched<Contributor>>,
}

impl Roster {
    /// Build the service around a client and an organization configuration.
    ///
    /// The repository slot keeps its entry until invalidated; the
    /// contributor slot expires per the configured sliding window and
    /// absolute ceiling.
    pub fn new(client: GitHubClient, config: OrgConfig) -> Self {
        let contributor_policy =
            ExpiryPolicy::expiring(config.contributors_sliding, config.contributors_absolute);

        Self {
            client,
            config,
            repo_cache: Slot::new(REPOSITORIES_KEY, ExpiryPolicy::KEEP),
            contributor_cache: Slot::new(CONTRIBUTORS_KEY, contributor_policy),
        }
    }

    /// Drop both cached slots, forcing the next queries upstream.
    pub async fn invalidate(&self) {
        self.repo_cache.invalidate().await;
        self.contributor_cache.invalidate().await;
    }
}
