// Repository catalog.
// Lists the organization's repositories with the exclusion filter applied,
// and resolves single repositories by name.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::github::Repository;

use super::outcome::{Fetched, Lookup};
use super::Roster;

impl Roster {
    /// List the organization's repositories, minus the configured exclusions.
    ///
    /// Served from the repository slot when populated; a miss goes upstream.
    /// This path is deliberately ungated, so concurrent misses may each
    /// issue the upstream call.
    pub async fn repositories(&self, cancel: &CancellationToken) -> Fetched<Repository> {
        if let Some(hit) = self.repo_cache.get().await {
            return Fetched::complete(hit.as_ref().clone());
        }

        let repos = match self.client.get_org_repos(&self.config.org, cancel).await {
            Ok(repos) => repos,
            Err(err) => {
                debug!(org = %self.config.org, error = %err, "repository list fetch failed");
                return Fetched::failed();
            }
        };

        let filtered: Vec<Repository> = repos
            .into_iter()
            .filter(|repo| {
                !self
                    .config
                    .excluded_repos
                    .iter()
                    .any(|name| name == &repo.name)
            })
            .collect();

        // An empty result is returned but never cached, so the next call
        // retries upstream.
        if !filtered.is_empty() {
            self.repo_cache.insert(filtered.clone()).await;
        }

        Fetched::complete(filtered)
    }

    /// Find exactly one repository by case-insensitive name.
    pub async fn find_repository(&self, name: &str, cancel: &CancellationToken) -> Lookup {
        let catalog = self.repositories(cancel).await;
        if !catalog.is_ok() {
            return Lookup::Unavailable;
        }

        let mut matches = catalog
            .items
            .into_iter()
            .filter(|repo| repo.name.eq_ignore_ascii_case(name));

        match (matches.next(), matches.next()) {
            (Some(repo), None) => Lookup::Found(repo),
            (Some(_), Some(_)) => {
                warn!(name, "repository name matched more than one catalog entry");
                Lookup::Ambiguous
            }
            (None, _) => Lookup::NotFound,
        }
    }
}
