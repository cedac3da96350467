//! API configuration module.
//!
//! Configuration is read from environment variables exactly once at startup.
//! A misconfigured remote storage backend is a fatal error: the process
//! refuses to serve traffic rather than discover the problem on the first
//! upload.

use std::env;
use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Selected image storage backend with its parameters
    pub storage: StorageConfig,
}

/// Storage backend selection, resolved from `STORAGE_BACKEND`.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Local filesystem (fully functional).
    Local { base_path: PathBuf, base_url: String },

    /// Supabase object storage (configuration-driven, transfer unimplemented).
    Supabase {
        url: String,
        anon_key: String,
        bucket: String,
    },

    /// MinIO object storage (configuration-driven, transfer unimplemented).
    Minio { endpoint: String, bucket: String },
}

impl ApiConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(|key| env::var(key).ok())
    }

    /// Load configuration through an injected variable lookup.
    ///
    /// Keeps the parsing logic testable without mutating process-global
    /// environment state.
    pub fn from_env(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let http_port = get("HTTP_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?;

        let database_path = PathBuf::from(
            get("DATABASE_PATH").unwrap_or_else(|| "./data/cardfolio.db".to_string()),
        );

        let request_timeout_secs = get("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?;

        let storage = Self::storage_from_env(&get)?;

        Ok(ApiConfig {
            http_port,
            database_path,
            request_timeout_secs,
            storage,
        })
    }

    fn storage_from_env(
        get: &impl Fn(&str) -> Option<String>,
    ) -> Result<StorageConfig, ConfigError> {
        let backend = get("STORAGE_BACKEND").unwrap_or_else(|| "local".to_string());

        match backend.as_str() {
            "local" => Ok(StorageConfig::Local {
                base_path: PathBuf::from(
                    get("STORAGE_BASE_PATH").unwrap_or_else(|| "storage/images".to_string()),
                ),
                base_url: get("STORAGE_BASE_URL")
                    .unwrap_or_else(|| "http://localhost:8000/static".to_string()),
            }),

            "supabase" => {
                let url = get("SUPABASE_URL")
                    .ok_or_else(|| ConfigError::MissingRequired("SUPABASE_URL".to_string()))?;
                let anon_key = get("SUPABASE_ANON_KEY")
                    .ok_or_else(|| ConfigError::MissingRequired("SUPABASE_ANON_KEY".to_string()))?;
                Ok(StorageConfig::Supabase {
                    url,
                    anon_key,
                    bucket: get("SUPABASE_BUCKET").unwrap_or_else(|| "card-images".to_string()),
                })
            }

            "minio" => Ok(StorageConfig::Minio {
                endpoint: get("MINIO_ENDPOINT").unwrap_or_else(|| "localhost:9000".to_string()),
                bucket: get("MINIO_BUCKET").unwrap_or_else(|| "card-images".to_string()),
            }),

            other => Err(ConfigError::UnknownStorageBackend(other.to_string())),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown storage backend: {0}")]
    UnknownStorageBackend(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(vars: HashMap<String, String>) -> Result<ApiConfig, ConfigError> {
        ApiConfig::from_env(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(env(&[])).unwrap();

        assert_eq!(config.http_port, 8000);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(matches!(config.storage, StorageConfig::Local { .. }));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(env(&[("HTTP_PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_supabase_requires_credentials() {
        // Selected but missing both credentials: startup must fail
        let err = load(env(&[("STORAGE_BACKEND", "supabase")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));

        // URL alone is not enough
        let err = load(env(&[
            ("STORAGE_BACKEND", "supabase"),
            ("SUPABASE_URL", "https://example.supabase.co"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));

        let config = load(env(&[
            ("STORAGE_BACKEND", "supabase"),
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert!(matches!(config.storage, StorageConfig::Supabase { .. }));
    }

    #[test]
    fn test_minio_defaults() {
        let config = load(env(&[("STORAGE_BACKEND", "minio")])).unwrap();
        match config.storage {
            StorageConfig::Minio { endpoint, bucket } => {
                assert_eq!(endpoint, "localhost:9000");
                assert_eq!(bucket, "card-images");
            }
            other => panic!("expected minio storage, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = load(env(&[("STORAGE_BACKEND", "s3")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStorageBackend(_)));
    }
}
