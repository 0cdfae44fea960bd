use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

/// Endpoint and credential for the external auth/persistence service.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub connection_timeout_seconds: u64,
    pub auth_dev_mode: bool,
    /// Absent only in dev mode; otherwise required at startup.
    pub supabase: Option<SupabaseConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("PORT"))?;
        let connection_timeout_seconds = env::var("CONNECTION_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("CONNECTION_TIMEOUT_SECONDS"))?;

        let auth_dev_mode =
            env::var("AUTH_DEV_MODE").unwrap_or_else(|_| "false".to_string()) == "true";

        let supabase = if auth_dev_mode {
            None
        } else {
            let url = env::var("SUPABASE_URL").map_err(|_| ConfigError::Missing("SUPABASE_URL"))?;
            let anon_key =
                env::var("SUPABASE_ANON_KEY").map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?;
            Some(SupabaseConfig { url, anon_key })
        };

        Ok(Self {
            host,
            port,
            connection_timeout_seconds,
            auth_dev_mode,
            supabase,
        })
    }
}
