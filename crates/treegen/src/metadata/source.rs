//! Where class metadata comes from, and the fetch-once cache in front of it.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use super::{ApiDump, MetadataRegistry};
use crate::diagnostic::GeneratorError;

/// Public API dump maintained by the client watch project.
pub const DEFAULT_API_DUMP_URL: &str =
    "https://raw.githubusercontent.com/CloneTrooper1019/Roblox-Client-Watch/roblox/API-Dump.json";

/// A document listing every class.
#[derive(Debug, Clone)]
pub enum MetadataSource {
    /// Fetched over HTTP.
    Url(String),
    /// Read from a local JSON file.
    File(PathBuf),
    /// Already decoded, mostly for tests and embedding.
    Inline(ApiDump),
}

impl MetadataSource {
    /// Interprets a command-line value: anything with an http(s) scheme is a URL.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            MetadataSource::Url(value.to_string())
        } else {
            MetadataSource::File(PathBuf::from(value))
        }
    }

    /// Fetches and decodes the dump.
    pub async fn fetch(&self) -> Result<ApiDump, GeneratorError> {
        let body = match self {
            MetadataSource::Url(url) => fetch_url(url).await?,
            MetadataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| GeneratorError::MetadataUnavailable {
                    message: format!("Failed to read {}: {}", path.display(), e),
                })?,
            MetadataSource::Inline(dump) => return Ok(dump.clone()),
        };

        serde_json::from_str(&body).map_err(|e| GeneratorError::MetadataUnavailable {
            message: format!("Failed to decode API data: {}", e),
        })
    }
}

async fn fetch_url(url: &str) -> Result<String, GeneratorError> {
    let unavailable = |e: reqwest::Error| GeneratorError::MetadataUnavailable {
        message: format!("Failed to fetch API data from {}: {}", url, e),
    };

    reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(unavailable)?
        .text()
        .await
        .map_err(unavailable)
}

/// Fetches the metadata source once and keeps the registry for the life of the cache.
///
/// Concurrent callers wait on the same fetch. A failed fetch is logged and
/// leaves an empty registry behind; it is not retried.
pub struct MetadataCache {
    source: MetadataSource,
    registry: OnceCell<Arc<MetadataRegistry>>,
}

impl MetadataCache {
    pub fn new(source: MetadataSource) -> Self {
        Self {
            source,
            registry: OnceCell::new(),
        }
    }

    pub async fn registry(&self) -> Arc<MetadataRegistry> {
        self.registry
            .get_or_init(|| async {
                info!("Fetching API data...");
                match self.source.fetch().await {
                    Ok(dump) => {
                        let registry = MetadataRegistry::from_dump(dump);
                        info!(classes = registry.len(), "API data loaded");
                        Arc::new(registry)
                    }
                    Err(e) => {
                        error!("[FATAL] {}", e);
                        Arc::new(MetadataRegistry::default())
                    }
                }
            })
            .await
            .clone()
    }
}
