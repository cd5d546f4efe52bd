use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub cv_path: PathBuf,
    /// `None` when SMTP credentials are absent; outbound mail then fails softly.
    pub smtp: Option<SmtpConfig>,
    pub smtp_timeout: Duration,
}

/// Connection settings for the outbound SMTP relay.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            cv_path: get("CV_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/cv_data.json")),
            smtp: smtp_from_lookup(&get)?,
            smtp_timeout: Duration::from_secs(
                get("SMTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("SMTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

fn smtp_from_lookup<F>(get: &F) -> Result<Option<SmtpConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(username), Some(password)) = (get("SMTP_USERNAME"), get("SMTP_PASSWORD")) else {
        return Ok(None);
    };

    let port = get("SMTP_PORT")
        .unwrap_or_else(|| "587".to_string())
        .parse::<u16>()
        .context("SMTP_PORT must be a valid port number")?;

    Ok(Some(SmtpConfig {
        host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
        port,
        from: get("SMTP_FROM").unwrap_or_else(|| username.clone()),
        username,
        password,
    }))
}
