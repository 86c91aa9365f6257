// Contributor aggregation.
// Merges per-repository contributor lists across the catalog, deduplicating
// by identity and dropping the bot account, behind the gated cache slot.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Result, RosterError};
use crate::github::Contributor;

use super::outcome::Fetched;
use super::Roster;

impl Roster {
    /// List all contributors across the organization's filtered repositories.
    ///
    /// The aggregate is the most expensive query in the system, so its slot
    /// is populated under the per-slot gate: concurrent callers either see
    /// the cached snapshot or wait for the one in-flight fan-out instead of
    /// starting their own.
    pub async fn contributors(&self, cancel: &CancellationToken) -> Fetched<Contributor> {
        let snapshot = self
            .contributor_cache
            .get_or_populate(cancel, self.aggregate_contributors(cancel))
            .await;

        match snapshot {
            Ok(snapshot) => snapshot.as_ref().clone(),
            Err(err) => {
                debug!(error = %err, "contributor aggregation failed");
                Fetched::failed()
            }
        }
    }

    /// One fan-out pass over every catalog repository.
    async fn aggregate_contributors(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Fetched<Contributor>> {
        let catalog = self.repositories(cancel).await;
        if !catalog.is_ok() {
            // The catalog being down degrades the aggregate to an empty
            // success. The snapshot expires like any other, so a later
            // cache epoch retries the whole pass.
            return Ok(Fetched::degraded());
        }

        let mut seen = HashSet::new();
        let mut merged: Vec<Contributor> = Vec::new();
        let mut skipped = 0usize;

        for repo in &catalog.items {
            if cancel.is_cancelled() {
                return Err(RosterError::Cancelled);
            }

            let contributors = match self
                .client
                .get_repo_contributors(&self.config.org, &repo.name, cancel)
                .await
            {
                Ok(contributors) => contributors,
                Err(RosterError::Cancelled) => return Err(RosterError::Cancelled),
                Err(err) => {
                    warn!(repo = %repo.name, error = %err, "skipping repository contributors");
                    skipped += 1;
                    continue;
                }
            };

            for contributor in contributors {
                if contributor.login == self.config.bot_login {
                    continue;
                }
                if seen.insert(contributor.id) {
                    merged.push(contributor);
                }
            }
        }

        Ok(if skipped == 0 {
            Fetched::complete(merged)
        } else {
            Fetched::partial(merged, skipped)
        })
    }

    /// List the contributors of a single repository, uncached and unfiltered.
    pub async fn contributors_for_repository(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Fetched<Contributor> {
        match self
            .client
            .get_repo_contributors(&self.config.org, name, cancel)
            .await
        {
            Ok(contributors) => Fetched::complete(contributors),
            Err(err) => {
                debug!(repo = name, error = %err, "contributor fetch failed");
                Fetched::failed()
            }
        }
    }
}
