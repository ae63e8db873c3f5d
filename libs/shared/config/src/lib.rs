use std::env;

use anyhow::{bail, Result};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_api_key: String,
    pub jwt_secret: String,
    pub mail_api_url: String,
    pub mail_api_token: String,
    pub mail_from: String,
}

impl AppConfig {
    /// Load configuration from the environment. Every option except the
    /// token signing secret degrades to an empty value with a warning;
    /// a missing `JWT_SECRET` aborts startup.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => bail!("JWT_SECRET not defined"),
        };

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                warn!("DATABASE_URL not set, using empty value");
                String::new()
            }),
            database_api_key: env::var("DATABASE_API_KEY").unwrap_or_else(|_| {
                warn!("DATABASE_API_KEY not set, using empty value");
                String::new()
            }),
            jwt_secret,
            mail_api_url: env::var("MAIL_API_URL").unwrap_or_else(|_| {
                warn!("MAIL_API_URL not set, outbound mail disabled");
                String::new()
            }),
            mail_api_token: env::var("MAIL_API_TOKEN").unwrap_or_else(|_| String::new()),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| String::new()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        Ok(config)
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty() && !self.jwt_secret.is_empty()
    }

    pub fn is_mail_configured(&self) -> bool {
        !self.mail_api_url.is_empty()
            && !self.mail_api_token.is_empty()
            && !self.mail_from.is_empty()
    }
}
