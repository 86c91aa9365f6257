// GitHub API endpoint functions.
// Typed fetch primitives for the three upstream queries the roster uses.

use tokio_util::sync::CancellationToken;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Contributor, Repository, TreeResponse};

impl GitHubClient {
    /// Get all repositories of an organization.
    pub async fn get_org_repos(
        &self,
        org: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Repository>> {
        self.get_json(&format!("/orgs/{}/repos", org), cancel).await
    }

    /// Get the contributors of a single repository.
    pub async fn get_repo_contributors(
        &self,
        org: &str,
        repo: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Contributor>> {
        self.get_json(&format!("/repos/{}/{}/contributors", org, repo), cancel)
            .await
    }

    /// Get the recursive git tree of a repository at a branch.
    pub async fn get_repo_tree(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
        cancel: &CancellationToken,
    ) -> Result<TreeResponse> {
        self.get_json(
            &format!("/repos/{}/{}/git/trees/{}?recursive=true", org, repo, branch),
            cancel,
        )
        .await
    }
}
