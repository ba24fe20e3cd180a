//! Asset byte-stream readers.
//!
//! Assets are addressed by a source string that is either a filesystem path
//! or an `http(s)://` URL. Relative URIs inside an asset (glTF buffer
//! references) resolve against the source's parent directory or URL.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{Result, ViewerError};

/// Async byte reader for a family of assets sharing a root location.
pub trait AssetReader: Send + Sync {
    fn read_bytes(&self, uri: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Reads assets from the local filesystem.
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    /// `path` may point at a file, in which case its parent directory becomes
    /// the root.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        let data = tokio::fs::read(&path).await?;
        Ok(data)
    }
}

/// Reads assets over HTTP.
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub struct HttpAssetReader {
    root_url: reqwest::Url,
    client: reqwest::Client,
}

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
impl HttpAssetReader {
    pub fn new(url_str: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url_str)
            .map_err(|e| ViewerError::GltfError(format!("invalid asset URL '{url_str}': {e}")))?;

        // Trim the final path segment so relative URIs join correctly
        let root_url = if url.path().ends_with('/') {
            url
        } else {
            let mut u = url.clone();
            if let Ok(mut segments) = u.path_segments_mut() {
                segments.pop();
                segments.push("");
            }
            u
        };

        Ok(Self {
            root_url,
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
        })
    }

    #[inline]
    pub fn root_url(&self) -> &reqwest::Url {
        &self.root_url
    }
}

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
impl AssetReader for HttpAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let url = self
            .root_url
            .join(uri)
            .map_err(|e| ViewerError::GltfError(format!("invalid asset URI '{uri}': {e}")))?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ViewerError::HttpResponseError {
                uri: uri.to_string(),
                status: resp.status().as_u16(),
            });
        }
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Enum dispatch over the reader implementations.
#[derive(Clone)]
pub enum AssetReaderVariant {
    File(Arc<FileAssetReader>),
    #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
    Http(Arc<HttpAssetReader>),
}

impl AssetReaderVariant {
    /// Picks a reader from the source string's scheme.
    pub fn from_source(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
            {
                Ok(Self::Http(Arc::new(HttpAssetReader::new(source)?)))
            }
            #[cfg(not(all(feature = "http", not(target_arch = "wasm32"))))]
            {
                Err(ViewerError::FeatureNotEnabled(
                    "http (required for URL asset sources)".to_string(),
                ))
            }
        } else {
            Ok(Self::File(Arc::new(FileAssetReader::new(source))))
        }
    }

    pub async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        match self {
            Self::File(r) => r.read_bytes(uri).await,
            #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
            Self::Http(r) => r.read_bytes(uri).await,
        }
    }

    /// Final path segment of a source string.
    #[must_use]
    pub fn source_filename(source: &str) -> &str {
        if source.starts_with("http://") || source.starts_with("https://") {
            source.rsplit('/').next().unwrap_or(source)
        } else {
            Path::new(source)
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(source)
        }
    }
}
