use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::store::split_comma_list;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Replacement vocabulary for the "Tools & Languages" skill group.
    /// `None` keeps the built-in list.
    pub skill_keywords: Option<Vec<String>>,
    /// Sessions untouched for this long are discarded.
    pub session_idle_ttl: Duration,
    /// How often idle sessions are looked for.
    pub session_sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            skill_keywords: None,
            session_idle_ttl: Duration::from_secs(60 * 60),
            session_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    /// `SKILL_KEYWORDS` takes precedence over `SKILL_KEYWORDS_FILE`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => defaults.port,
        };

        let rust_log = lookup("RUST_LOG").unwrap_or(defaults.rust_log);

        let session_idle_ttl = match lookup("SESSION_IDLE_TTL_SECS") {
            Some(raw) => parse_secs("SESSION_IDLE_TTL_SECS", &raw)?,
            None => defaults.session_idle_ttl,
        };
        let session_sweep_interval = match lookup("SESSION_SWEEP_INTERVAL_SECS") {
            Some(raw) => parse_secs("SESSION_SWEEP_INTERVAL_SECS", &raw)?,
            None => defaults.session_sweep_interval,
        };

        let skill_keywords = match (lookup("SKILL_KEYWORDS"), lookup("SKILL_KEYWORDS_FILE")) {
            (Some(list), _) => Some(split_comma_list(&list)),
            (None, Some(path)) => Some(load_keywords_file(Path::new(&path))?),
            (None, None) => None,
        };

        if let Some(keywords) = &skill_keywords {
            anyhow::ensure!(
                !keywords.is_empty(),
                "Skill keyword list is set but contains no keywords"
            );
        }

        Ok(Config {
            port,
            rust_log,
            skill_keywords,
            session_idle_ttl,
            session_sweep_interval,
        })
    }
}

/// Parses a positive whole number of seconds.
fn parse_secs(key: &str, raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds, got '{raw}'"))?;
    anyhow::ensure!(secs > 0, "{key} must be greater than zero");
    Ok(Duration::from_secs(secs))
}

/// Reads a keyword file. Entries may be separated by commas, newlines or both.
fn load_keywords_file(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read SKILL_KEYWORDS_FILE '{}'", path.display()))?;
    Ok(raw.lines().flat_map(split_comma_list).collect())
}
