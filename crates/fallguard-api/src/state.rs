use std::sync::Arc;

use fallguard_analytics::{AnalyticsSink, NoopSink, TracingSink};
use fallguard_core::models::locale::Locale;
use fallguard_storage::client::build_client;
use fallguard_storage::local::LocalStore;
use fallguard_storage::s3::S3Store;
use fallguard_storage::store::Store;

use crate::config::{AnalyticsBackend, ApiConfig, StorageBackend};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub default_locale: Locale,
}

impl AppState {
    pub fn new(store: Store, analytics: Arc<dyn AnalyticsSink>, default_locale: Locale) -> Self {
        Self {
            store,
            analytics,
            default_locale,
        }
    }

    pub async fn from_config(config: &ApiConfig) -> Self {
        let store = match &config.storage {
            StorageBackend::Local { data_dir } => Store::Local(LocalStore::new(data_dir)),
            StorageBackend::S3 { bucket, region } => {
                let client = build_client(region.clone()).await;
                Store::S3(S3Store::new(client, bucket))
            }
        };

        let analytics: Arc<dyn AnalyticsSink> = match config.analytics {
            AnalyticsBackend::Tracing => Arc::new(TracingSink),
            AnalyticsBackend::Off => Arc::new(NoopSink),
        };

        tracing::info!(
            storage = store.backend_name(),
            default_locale = %config.default_locale,
            "application state ready"
        );

        Self::new(store, analytics, config.default_locale)
    }
}
