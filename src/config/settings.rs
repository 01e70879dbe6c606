use std::env;

use url::Url;

use super::{DEFAULT_EMBEDDING_DIMENSIONS, HALF_PRECISION_DIMENSIONS};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which hosted embeddings API to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    OpenAi,
    Upstage,
}

impl EmbeddingProviderKind {
    /// Exactly `upstage` selects Upstage; every other name falls back to
    /// OpenAI.
    pub fn parse(name: &str) -> Self {
        if name == "upstage" {
            EmbeddingProviderKind::Upstage
        } else {
            if name != "openai" {
                tracing::warn!(provider = name, "unknown embedding provider, using OpenAI");
            }
            EmbeddingProviderKind::OpenAi
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            EmbeddingProviderKind::OpenAi => "https://api.openai.com/v1",
            EmbeddingProviderKind::Upstage => "https://api.upstage.ai/v1/solar",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            EmbeddingProviderKind::OpenAi => "OPENAI_API_KEY",
            EmbeddingProviderKind::Upstage => "UPSTAGE_API_KEY",
        }
    }

    /// Output width to request from the provider, if it accepts one.
    ///
    /// Upstage is asked for 4096 components when the store keeps 4000-wide
    /// half precision vectors; the query is truncated afterwards.
    pub fn requested_dimensions(&self, stored_dimensions: usize) -> Option<usize> {
        match self {
            EmbeddingProviderKind::OpenAi => None,
            EmbeddingProviderKind::Upstage if stored_dimensions == HALF_PRECISION_DIMENSIONS => {
                Some(4096)
            }
            EmbeddingProviderKind::Upstage => Some(stored_dimensions),
        }
    }
}

impl std::fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderKind::OpenAi => write!(f, "openai"),
            EmbeddingProviderKind::Upstage => write!(f, "upstage"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Full connection URL; takes precedence over the individual parts.
    pub url: Option<String>,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let invalid = |key: &'static str, value: &str| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "cannot be used in a connection URL".to_string(),
        };

        let mut url = Url::parse("postgresql://localhost").map_err(|e| ConfigError::InvalidValue {
            key: "POSTGRES_HOST",
            value: self.host.clone(),
            reason: e.to_string(),
        })?;
        url.set_host(Some(&self.host))
            .map_err(|_| invalid("POSTGRES_HOST", &self.host))?;
        url.set_port(Some(self.port))
            .map_err(|_| invalid("POSTGRES_PORT", &self.port.to_string()))?;
        url.set_username(&self.user)
            .map_err(|_| invalid("POSTGRES_USER", &self.user))?;
        url.set_password(Some(&self.password))
            .map_err(|_| invalid("POSTGRES_PASSWORD", "<redacted>"))?;
        url.set_path(&self.database);

        Ok(url.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub dimensions: usize,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub embedding: EmbeddingSettings,
}

impl Settings {
    /// Reads settings from the process environment after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseSettings {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            user: or("POSTGRES_USER", "user"),
            password: or("POSTGRES_PASSWORD", "password"),
            host: or("POSTGRES_HOST", "host"),
            port: parse_number("POSTGRES_PORT", &or("POSTGRES_PORT", "5432"))?,
            database: or("POSTGRES_DB", "database"),
        };

        let provider = EmbeddingProviderKind::parse(&or("EMBEDDING_PROVIDER", "upstage"));
        let dimensions: usize = parse_number(
            "EMBEDDING_DIMENSIONS",
            &or("EMBEDDING_DIMENSIONS", &DEFAULT_EMBEDDING_DIMENSIONS.to_string()),
        )?;
        if dimensions == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EMBEDDING_DIMENSIONS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let embedding = EmbeddingSettings {
            provider,
            model: or("EMBEDDING_MODEL", "embedding-query"),
            dimensions,
            api_key: lookup(provider.api_key_var()),
            base_url: or("EMBEDDINGS_BASE_URL", provider.default_base_url()),
            timeout_secs: parse_number("EMBEDDINGS_TIMEOUT_SECS", &or("EMBEDDINGS_TIMEOUT_SECS", "30"))?,
            max_retries: parse_number("EMBEDDINGS_MAX_RETRIES", &or("EMBEDDINGS_MAX_RETRIES", "2"))?,
        };

        Ok(Self {
            database,
            embedding,
        })
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}
