//! Cached read-through client for a GitHub organization.
//!
//! `roster` answers three queries against one fixed GitHub organization:
//! which repositories it has, who contributes across them, and which paths a
//! repository's tree holds. Upstream calls are hidden behind an in-process
//! cache with explicit per-key expiration.
//!
//! ## Modules
//!
//! - [`github`]: HTTP client and wire types for the GitHub REST API
//! - [`cache`]: in-process cache slots with sliding/absolute expiration
//! - [`service`]: the cached, filtering, aggregating query surface
//! - [`config`]: organization name, exclusion filters, and cache lifetimes
//!
//! ## Example
//!
//! ```no_run
//! use roster::{GitHubClient, OrgConfig, Roster};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> roster::Result<()> {
//! let client = GitHubClient::from_env()?;
//! let roster = Roster::new(client, OrgConfig::default());
//!
//! let cancel = CancellationToken::new();
//! let repos = roster.repositories(&cancel).await;
//! for repo in &repos.items {
//!     println!("{}", repo.full_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod service;

pub use config::OrgConfig;
pub use error::{Result, RosterError};
pub use github::GitHubClient;
pub use service::{Coverage, Fetched, Lookup, Roster};
