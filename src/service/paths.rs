// Path lister.
// Lists every path in one repository's tree at a branch, uncached.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::github::TreeEntry;

use super::outcome::Fetched;
use super::Roster;

impl Roster {
    /// List all paths in a repository's recursive tree at `branch`.
    pub async fn paths(
        &self,
        repository: &str,
        branch: &str,
        cancel: &CancellationToken,
    ) -> Fetched<TreeEntry> {
        let tree = match self
            .client
            .get_repo_tree(&self.config.org, repository, branch, cancel)
            .await
        {
            Ok(tree) => tree,
            Err(err) => {
                debug!(repo = repository, branch, error = %err, "tree fetch failed");
                return Fetched::failed();
            }
        };

        if tree.truncated {
            warn!(repo = repository, branch, "tree listing truncated by upstream");
        }

        Fetched::complete(tree.tree)
    }
}
