//! File-set sources
//!
//! A protorpc service publishes its file set as JSON under
//! `<service_path>/form/file_set`. The HTTP source fetches it once per
//! render; the static source serves a document loaded from disk.

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::domain::descriptor::FileSet;
use crate::domain::error::{FormError, FormResult};

/// Suffix appended to a service path to reach its file set
pub const FILE_SET_SUFFIX: &str = "/form/file_set";

/// URL of the file set for a service path
pub fn file_set_url(service_path: &str) -> String {
    format!("{}{}", service_path.trim_end_matches('/'), FILE_SET_SUFFIX)
}

#[async_trait]
pub trait FileSetSource: Send + Sync {
    /// Load the file set describing the service at `service_path`
    async fn load(&self, service_path: &str) -> FormResult<FileSet>;
}

// ============================================================================
// HTTP
// ============================================================================

pub struct HttpFileSetSource {
    client: reqwest::Client,
}

impl HttpFileSetSource {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFileSetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSetSource for HttpFileSetSource {
    async fn load(&self, service_path: &str) -> FormResult<FileSet> {
        let url = file_set_url(service_path);
        debug!("Fetching file set from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("File set fetch from {} failed with {}", url, status);
            return Err(FormError::FetchFailure {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let file_set: FileSet = response.json().await?;
        info!("Loaded file set from {} ({} files)", url, file_set.files.len());
        Ok(file_set)
    }
}

// ============================================================================
// Static
// ============================================================================

/// Serves one preloaded file set regardless of service path
pub struct StaticFileSetSource {
    file_set: FileSet,
}

impl StaticFileSetSource {
    pub fn new(file_set: FileSet) -> Self {
        Self { file_set }
    }

    /// Read a JSON file set from disk
    pub fn from_path(path: &Path) -> FormResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FormError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file_set = FileSet::from_json(&text)?;
        debug!("Loaded file set from {} ({} files)", path.display(), file_set.files.len());
        Ok(Self::new(file_set))
    }
}

#[async_trait]
impl FileSetSource for StaticFileSetSource {
    async fn load(&self, _service_path: &str) -> FormResult<FileSet> {
        Ok(self.file_set.clone())
    }
}
