use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// Meetup's OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://secure.meetup.com/oauth2/access";

/// Credentials for the refresh-token grant.
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: Url,
}

impl OAuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MEETUP_CLIENT_ID`: OAuth client ID (required)
    /// - `MEETUP_CLIENT_SECRET`: OAuth client secret (required)
    /// - `MEETUP_REFRESH_TOKEN`: long-lived refresh token (required)
    /// - `MEETUP_TOKEN_URL`: token endpoint (default: `https://secure.meetup.com/oauth2/access`)
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or blank, or if the
    /// token URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`OAuthConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let token_url: Url = lookup("MEETUP_TOKEN_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
            .parse()?;

        Ok(Self {
            client_id: required("MEETUP_CLIENT_ID")?,
            client_secret: required("MEETUP_CLIENT_SECRET")?,
            refresh_token: required("MEETUP_REFRESH_TOKEN")?,
            token_url,
        })
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("token_url", &self.token_url.as_str())
            .finish()
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

    const COMPLETE: &[(&str, &str)] = &[
        ("MEETUP_CLIENT_ID", "client"),
        ("MEETUP_CLIENT_SECRET", "secret"),
        ("MEETUP_REFRESH_TOKEN", "refresh"),
    ];

    #[test]
    fn test_defaults_token_url() {
        let config = OAuthConfig::from_lookup(lookup(COMPLETE)).unwrap();

        assert_eq!(config.client_id, "client");
        assert_eq!(config.token_url.as_str(), DEFAULT_TOKEN_URL);
    }

    #[test]
    fn test_overrides_token_url() {
        let mut vars = COMPLETE.to_vec();
        vars.push(("MEETUP_TOKEN_URL", "http://127.0.0.1:9000/oauth2/access"));

        let config = OAuthConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.token_url.as_str(), "http://127.0.0.1:9000/oauth2/access");
    }

    #[test]
    fn test_missing_secret_is_error() {
        let result = OAuthConfig::from_lookup(lookup(&[
            ("MEETUP_CLIENT_ID", "client"),
            ("MEETUP_REFRESH_TOKEN", "refresh"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::Missing("MEETUP_CLIENT_SECRET"))
        ));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut vars = COMPLETE.to_vec();
        vars[0] = ("MEETUP_CLIENT_ID", "  ");

        let result = OAuthConfig::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(ConfigError::Missing("MEETUP_CLIENT_ID"))));
    }

    #[test]
    fn test_invalid_token_url() {
        let mut vars = COMPLETE.to_vec();
        vars.push(("MEETUP_TOKEN_URL", "not a url"));

        let result = OAuthConfig::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(ConfigError::InvalidTokenUrl(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = OAuthConfig::from_lookup(lookup(COMPLETE)).unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("secret\""));
        assert!(!debug.contains("refresh\""));
        assert!(debug.contains("<redacted>"));
    }
}
