use std::{env, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use rsvpsync_auth::OAuthConfig;
use rsvpsync_core::events::EventsApi;
use url::Url;

use crate::upstream::rest_events_url;

/// Slack between the worst-case upstream time and the server-wide request timeout.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(1);

/// Server-wide request timeout for a given per-call upstream timeout.
///
/// `/events` makes up to two sequential upstream calls (token refresh, then
/// events), so the request timeout must outlast both. Otherwise a slow
/// upstream surfaces as 408 instead of a 502 upstream error.
pub fn request_timeout_for(upstream_timeout: Duration) -> Duration {
    upstream_timeout
        .saturating_mul(2)
        .saturating_add(REQUEST_TIMEOUT_MARGIN)
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Refresh-token grant credentials.
    pub oauth: OAuthConfig,
    /// Meetup group whose events are served.
    pub group_urlname: String,
    /// Which events API to call (default: rest)
    pub events_api: EventsApi,
    /// Base URL of the REST API (default: "https://api.meetup.com")
    pub api_url: Url,
    /// GraphQL endpoint (default: "https://api.meetup.com/gql")
    pub graphql_url: Url,
    /// Events requested per GraphQL query (default: 20)
    pub page_size: u32,
    /// Timeout for every upstream HTTP call, in seconds (default: 10)
    pub upstream_timeout_secs: u64,
    /// Whether `/events` includes local attendee names (default: false)
    pub expose_local_names: bool,
    /// Whether ledger writes use compare-and-swap when the store allows it (default: true)
    pub conditional_writes: bool,
    /// Compare-and-swap attempts per RSVP before giving up (default: 5)
    pub ledger_max_attempts: u32,
    /// Path to SQLite database file (default: "rsvpsync.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEETUP_CLIENT_ID`, `MEETUP_CLIENT_SECRET`, `MEETUP_REFRESH_TOKEN` (required)
    /// - `MEETUP_TOKEN_URL` - OAuth token endpoint
    /// - `GROUP_URLNAME` - Meetup group url name (required)
    /// - `EVENTS_API` - `rest` or `graphql` (default: rest)
    /// - `MEETUP_API_URL` - REST base URL (default: "https://api.meetup.com")
    /// - `MEETUP_GRAPHQL_URL` - GraphQL endpoint (default: "https://api.meetup.com/gql")
    /// - `EVENTS_PAGE_SIZE` - GraphQL page size (default: 20)
    /// - `UPSTREAM_TIMEOUT_SECS` - upstream HTTP timeout (default: 10)
    /// - `EXPOSE_LOCAL_NAMES` - include attendee names in `/events` (default: false)
    /// - `CONDITIONAL_WRITES` - compare-and-swap ledger writes (default: true)
    /// - `LEDGER_MAX_ATTEMPTS` - compare-and-swap attempts (default: 5)
    /// - `SQLITE_PATH` - SQLite database path (default: "rsvpsync.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let oauth = OAuthConfig::from_lookup(&lookup).context("invalid OAuth configuration")?;

        let group_urlname = get("GROUP_URLNAME")
            .map(|value| value.trim().to_string())
            .ok_or_else(|| anyhow!("missing environment variable GROUP_URLNAME"))?;

        Ok(Self {
            oauth,
            group_urlname,
            events_api: parse_or(get("EVENTS_API"), "EVENTS_API", EventsApi::Rest)?,
            api_url: parse_or(
                get("MEETUP_API_URL"),
                "MEETUP_API_URL",
                Url::parse("https://api.meetup.com")?,
            )?,
            graphql_url: parse_or(
                get("MEETUP_GRAPHQL_URL"),
                "MEETUP_GRAPHQL_URL",
                Url::parse("https://api.meetup.com/gql")?,
            )?,
            page_size: parse_or(get("EVENTS_PAGE_SIZE"), "EVENTS_PAGE_SIZE", 20)?,
            upstream_timeout_secs: parse_or(
                get("UPSTREAM_TIMEOUT_SECS"),
                "UPSTREAM_TIMEOUT_SECS",
                10,
            )?,
            expose_local_names: parse_flag(get("EXPOSE_LOCAL_NAMES"), "EXPOSE_LOCAL_NAMES", false)?,
            conditional_writes: parse_flag(get("CONDITIONAL_WRITES"), "CONDITIONAL_WRITES", true)?,
            ledger_max_attempts: parse_or(get("LEDGER_MAX_ATTEMPTS"), "LEDGER_MAX_ATTEMPTS", 5)?,
            sqlite_path: get("SQLITE_PATH").unwrap_or_else(|| "rsvpsync.db".to_string()),
            redis_url: get("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
        })
    }

    /// Get the upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Timeout applied to a whole inbound request.
    pub fn request_timeout(&self) -> Duration {
        request_timeout_for(self.upstream_timeout())
    }

    /// URL the configured events API variant is called at.
    pub fn events_endpoint(&self) -> anyhow::Result<Url> {
        match self.events_api {
            EventsApi::Rest => rest_events_url(&self.api_url, &self.group_urlname)
                .ok_or_else(|| anyhow!("MEETUP_API_URL cannot be used as a base URL")),
            EventsApi::Graphql => Ok(self.graphql_url.clone()),
        }
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value for {key}: {e}")),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, key: &str, default: bool) -> anyhow::Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(anyhow!(
            "invalid value for {key}: '{other}' (expected true/false, 1/0 or yes/no)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("MEETUP_CLIENT_ID", "client"),
            ("MEETUP_CLIENT_SECRET", "secret"),
            ("MEETUP_REFRESH_TOKEN", "refresh"),
            ("GROUP_URLNAME", "rust-meetup"),
        ]
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup(&required())).unwrap();

        assert_eq!(config.group_urlname, "rust-meetup");
        assert_eq!(config.events_api, EventsApi::Rest);
        assert_eq!(config.api_url.as_str(), "https://api.meetup.com/");
        assert_eq!(config.graphql_url.as_str(), "https://api.meetup.com/gql");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert!(!config.expose_local_names);
        assert!(config.conditional_writes);
        assert_eq!(config.ledger_max_attempts, 5);
        assert_eq!(config.sqlite_path, "rsvpsync.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
    }

    #[test]
    fn test_overrides() {
        let mut vars = required();
        vars.extend([
            ("EVENTS_API", "graphql"),
            ("EVENTS_PAGE_SIZE", "50"),
            ("EXPOSE_LOCAL_NAMES", "true"),
            ("CONDITIONAL_WRITES", "0"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]);

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.events_api, EventsApi::Graphql);
        assert_eq!(config.page_size, 50);
        assert!(config.expose_local_names);
        assert!(!config.conditional_writes);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_request_timeout_outlasts_two_upstream_calls() {
        let config = Config::from_lookup(lookup(&required())).unwrap();

        assert_eq!(config.request_timeout(), Duration::from_secs(21));
        assert!(config.request_timeout() > config.upstream_timeout() * 2);
        assert!(request_timeout_for(Duration::ZERO) > Duration::ZERO);
    }

    #[test]
    fn test_missing_group_is_error() {
        let vars: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != "GROUP_URLNAME")
            .collect();

        let error = Config::from_lookup(lookup(&vars)).unwrap_err();

        assert!(error.to_string().contains("GROUP_URLNAME"));
    }

    #[test]
    fn test_missing_oauth_is_error() {
        let result = Config::from_lookup(lookup(&[("GROUP_URLNAME", "g")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_number_is_error() {
        let mut vars = required();
        vars.push(("EVENTS_PAGE_SIZE", "lots"));

        let error = Config::from_lookup(lookup(&vars)).unwrap_err();

        assert!(error.to_string().contains("EVENTS_PAGE_SIZE"));
    }

    #[test]
    fn test_flag_spellings() {
        for (raw, expected) in [("TRUE", true), ("yes", true), ("1", true), ("No", false), ("0", false)] {
            let mut vars = required();
            vars.push(("CONDITIONAL_WRITES", raw));

            let config = Config::from_lookup(lookup(&vars)).unwrap();

            assert_eq!(config.conditional_writes, expected, "CONDITIONAL_WRITES={raw}");
        }
    }

    #[test]
    fn test_unrecognized_flag_is_error() {
        let mut vars = required();
        vars.push(("CONDITIONAL_WRITES", "on"));

        let error = Config::from_lookup(lookup(&vars)).unwrap_err();

        assert!(error.to_string().contains("CONDITIONAL_WRITES"));
    }

    #[test]
    fn test_unknown_events_api_is_error() {
        let mut vars = required();
        vars.push(("EVENTS_API", "soap"));

        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_events_endpoint_per_variant() {
        let mut vars = required();
        let rest = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            rest.events_endpoint().unwrap().as_str(),
            "https://api.meetup.com/rust-meetup/events"
        );

        vars.push(("EVENTS_API", "graphql"));
        let graphql = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            graphql.events_endpoint().unwrap().as_str(),
            "https://api.meetup.com/gql"
        );
    }
}
