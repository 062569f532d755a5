//! Configuration module for environment variable parsing.
//!
//! All configuration is read from the environment exactly once at startup
//! and held immutably for the process lifetime; nothing reads secrets from
//! the environment at call time. Secret values never appear in logs, only
//! whether they are configured.

use std::env;

use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Secrets for verifying client payment confirmations, newest first.
    /// Comma-separated in `RAZORPAY_KEY_SECRET` to support rotation.
    pub confirmation_secrets: Vec<String>,

    /// Secrets for verifying webhook deliveries, newest first.
    /// Comma-separated in `RAZORPAY_WEBHOOK_SECRET`; falls back to the
    /// confirmation secrets when unset.
    pub webhook_secrets: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let confirmation_secrets = parse_csv("RAZORPAY_KEY_SECRET").unwrap_or_default();

        let webhook_secrets = match parse_csv("RAZORPAY_WEBHOOK_SECRET") {
            Some(secrets) => secrets,
            None => {
                // Deliberate fallback: deployments that configured only the
                // key secret verify webhooks with it too.
                warn!("webhook_secret_unset_falling_back_to_key_secret");
                confirmation_secrets.clone()
            }
        };

        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            confirmation_secrets,
            webhook_secrets,
        }
    }
}

/// Parse a comma-separated list of strings.
fn parse_csv(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        env::set_var("TEST_SECRET_CSV", "whsec_new, whsec_old");
        let result = parse_csv("TEST_SECRET_CSV");
        assert_eq!(
            result,
            Some(vec!["whsec_new".to_string(), "whsec_old".to_string()])
        );
        env::remove_var("TEST_SECRET_CSV");
    }

    #[test]
    fn test_parse_csv_missing() {
        assert_eq!(parse_csv("NONEXISTENT_SECRET_VAR"), None);
    }

    #[test]
    fn test_from_env_webhook_fallback() {
        // Env vars are process-global, so both cases run in one test.
        env::set_var("RAZORPAY_KEY_SECRET", "whsec_key");
        env::remove_var("RAZORPAY_WEBHOOK_SECRET");
        let config = Config::from_env();
        assert_eq!(config.confirmation_secrets, vec!["whsec_key".to_string()]);
        assert_eq!(config.webhook_secrets, vec!["whsec_key".to_string()]);

        env::set_var("RAZORPAY_WEBHOOK_SECRET", "whsec_hook");
        let config = Config::from_env();
        assert_eq!(config.webhook_secrets, vec!["whsec_hook".to_string()]);
        assert_eq!(config.confirmation_secrets, vec!["whsec_key".to_string()]);

        env::remove_var("RAZORPAY_KEY_SECRET");
        env::remove_var("RAZORPAY_WEBHOOK_SECRET");
    }
}
