use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use fallguard_core::models::locale::Locale;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// JSON files under a directory on this host.
    Local { data_dir: PathBuf },
    /// JSON objects in an S3 bucket.
    S3 {
        bucket: String,
        region: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsBackend {
    Tracing,
    Off,
}

/// Service configuration, read from `FALLGUARD_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub storage: StorageBackend,
    pub default_locale: Locale,
    pub analytics: AnalyticsBackend,
    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup. Unset and blank
    /// variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = var("FALLGUARD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .map_err(|e| eyre::eyre!("invalid FALLGUARD_BIND '{bind}': {e}"))?;

        let storage = match var("FALLGUARD_STORAGE").as_deref() {
            None | Some("local") => StorageBackend::Local {
                data_dir: match var("FALLGUARD_DATA_DIR") {
                    Some(dir) => PathBuf::from(dir),
                    None => default_data_dir()?,
                },
            },
            Some("s3") => StorageBackend::S3 {
                bucket: var("FALLGUARD_BUCKET")
                    .ok_or_else(|| eyre::eyre!("FALLGUARD_BUCKET is required for s3 storage"))?,
                region: var("AWS_REGION"),
            },
            Some(other) => {
                return Err(eyre::eyre!(
                    "unknown FALLGUARD_STORAGE '{other}', expected 'local' or 's3'"
                ));
            }
        };

        let default_locale = match var("FALLGUARD_DEFAULT_LOCALE") {
            Some(tag) => tag.parse()?,
            None => Locale::default(),
        };

        let analytics = match var("FALLGUARD_ANALYTICS").as_deref() {
            None | Some("tracing") => AnalyticsBackend::Tracing,
            Some("off") => AnalyticsBackend::Off,
            Some(other) => {
                return Err(eyre::eyre!(
                    "unknown FALLGUARD_ANALYTICS '{other}', expected 'tracing' or 'off'"
                ));
            }
        };

        let allowed_origins = var("FALLGUARD_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind,
            storage,
            default_locale,
            analytics,
            allowed_origins,
        })
    }

    pub fn cors_layer(&self) -> eyre::Result<CorsLayer> {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if self.allowed_origins.is_empty() {
            return Ok(cors.allow_origin(Any));
        }

        let origins = self
            .allowed_origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(cors.allow_origin(AllowOrigin::list(origins)))
    }
}

fn parse_origin(origin: &str) -> eyre::Result<HeaderValue> {
    HeaderValue::from_str(origin)
        .map_err(|e| eyre::eyre!("invalid origin '{origin}': {e}"))
}

fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("fallguard"))
}
