// Organization configuration.
// Names the fixed organization, the repositories to hide, the bot account
// to drop from contributor aggregation, and the contributor cache lifetimes.

use std::time::Duration;

/// Default organization whose repositories are enumerated.
pub const DEFAULT_ORG: &str = "atc-net";

/// Repository names hidden from the catalog (exact, case-sensitive).
pub const DEFAULT_EXCLUDED_REPOS: [&str; 2] = ["atc-dummy", "atc-template-dotnet-package"];

/// Bot login dropped from aggregated contributor lists (exact match).
pub const DEFAULT_BOT_LOGIN: &str = "ATCBot";

/// Sliding expiration for the aggregated contributor list.
pub const CONTRIBUTORS_SLIDING_EXPIRATION: Duration = Duration::from_secs(60 * 60);

/// Absolute expiration ceiling for the aggregated contributor list,
/// measured from insertion regardless of later hits.
pub const CONTRIBUTORS_ABSOLUTE_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Settings consumed by the roster service.
#[derive(Debug, Clone)]
pub struct OrgConfig {
    /// Organization account whose repositories are listed.
    pub org: String,
    /// Repository names filtered out of the catalog.
    pub excluded_repos: Vec<String>,
    /// Contributor login excluded from aggregation.
    pub bot_login: String,
    /// Sliding window for the contributors cache entry.
    pub contributors_sliding: Duration,
    /// Absolute ceiling for the contributors cache entry.
    pub contributors_absolute: Duration,
}

impl OrgConfig {
    /// Configuration for an organization, with the default filters and lifetimes.
    pub fn for_org(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            ..Self::default()
        }
    }
}

impl Default for OrgConfig {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            excluded_repos: DEFAULT_EXCLUDED_REPOS.map(String::from).to_vec(),
            bot_login: DEFAULT_BOT_LOGIN.to_string(),
            contributors_sliding: CONTRIBUTORS_SLIDING_EXPIRATION,
            contributors_absolute: CONTRIBUTORS_ABSOLUTE_EXPIRATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrgConfig::default();
        assert_eq!(config.org, "atc-net");
        assert_eq!(config.excluded_repos.len(), 2);
        assert_eq!(config.bot_login, "ATCBot");
        assert!(config.contributors_sliding < config.contributors_absolute);
    }

    #[test]
    fn test_for_org_keeps_defaults() {
        let config = OrgConfig::for_org("other-org");
        assert_eq!(config.org, "other-org");
        assert_eq!(config.bot_login, DEFAULT_BOT_LOGIN);
    }
}
