use serde::Deserialize;

/// Longest accepted session inactivity window (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub cookie_secure: bool,
    pub ttl_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_secure: false,
            ttl_minutes: 60 * 24 * 14,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let defaults = SessionConfig::default();

        let cookie_secure = match var("SESSION_COOKIE_SECURE") {
            Some(v) => parse_flag(&v).ok_or_else(|| {
                anyhow::anyhow!("SESSION_COOKIE_SECURE must be a boolean, got {v:?}")
            })?,
            None => defaults.cookie_secure,
        };

        let ttl_minutes = match var("SESSION_TTL_MINUTES") {
            Some(v) => v.trim().parse::<i64>().map_err(|e| {
                anyhow::anyhow!("SESSION_TTL_MINUTES must be an integer, got {v:?}: {e}")
            })?,
            None => defaults.ttl_minutes,
        };
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&ttl_minutes) {
            anyhow::bail!(
                "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {ttl_minutes}"
            );
        }

        Ok(Self {
            database_url,
            session: SessionConfig {
                cookie_secure,
                ttl_minutes,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    let v = raw.trim();
    if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if ["0", "false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}
