use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub jwt_secret: String,
    pub require_auth: bool,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing or blank
    /// required keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| -> anyhow::Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("missing required environment variable {key}"))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let addr = required("SERVER_ADDRESS")?.parse::<SocketAddr>().context("SERVER_ADDRESS")?;

        let require_auth = match lookup("REQUIRE_AUTH") {
            Some(v) => parse_bool(&v).context("REQUIRE_AUTH")?,
            None => false,
        };

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().context("REQUEST_TIMEOUT_SECS")?,
            None => 30,
        };

        Ok(Self {
            addr,
            database_url,
            jwt_secret,
            require_auth,
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}
