//! Storage-backed file serving
//!
//! [`StorageService`] is provider-agnostic: the backend is any
//! [`StorageReader`]. It rejects traversal keys before the reader sees them,
//! keeps backend errors away from the caller, and resolves a content type
//! when the backend has none.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Fallback content type
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content and metadata of a stored object
#[derive(Debug, Clone, PartialEq)]
pub struct StorageReadResult {
    pub content: Bytes,
    /// Backend metadata; may be empty
    pub content_type: String,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found")]
    NotFound,

    #[error("read cancelled")]
    Cancelled,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads objects from a storage backend
#[async_trait]
pub trait StorageReader: Send + Sync {
    async fn read_object(
        &self,
        container: &str,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<StorageReadResult, StorageError>;
}

/// What the HTTP layer sends back on success
#[derive(Debug, Clone, PartialEq)]
pub struct ServedObject {
    pub content: Bytes,
    pub content_type: String,
}

/// Caller-facing failure. Carries no backend detail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeError {
    #[error("not found")]
    NotFound,
    /// The requester went away; nothing to report
    #[error("request cancelled")]
    Cancelled,
    #[error("internal server error")]
    Internal,
}

/// Serves objects of one container under one route prefix
#[derive(Clone)]
pub struct StorageService {
    reader: Arc<dyn StorageReader>,
    container: String,
    route_prefix: String,
}

impl StorageService {
    pub fn new(reader: Arc<dyn StorageReader>, container: &str, route_prefix: &str) -> Self {
        Self {
            reader,
            container: container.to_string(),
            route_prefix: route_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Prefix with any trailing `/` removed
    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    /// Router pattern capturing the object key
    pub fn route_pattern(&self) -> String {
        format!("{}/*path", self.route_prefix)
    }

    /// Read `key` and resolve its content type
    pub async fn serve(&self, key: &str, cancel: &CancellationToken) -> Result<ServedObject, ServeError> {
        if key.is_empty() || key.contains("..") {
            return Err(ServeError::NotFound);
        }

        let result = match self.reader.read_object(&self.container, key, cancel).await {
            Ok(result) => result,
            Err(StorageError::NotFound) => return Err(ServeError::NotFound),
            Err(StorageError::Cancelled) => return Err(ServeError::Cancelled),
            Err(_) if cancel.is_cancelled() => return Err(ServeError::Cancelled),
            Err(e) => {
                log::error!("storage read error for {}: {}", key, e);
                return Err(ServeError::Internal);
            }
        };

        Ok(ServedObject {
            content_type: content_type_for(key, &result.content_type),
            content: result.content,
        })
    }
}

/// Content type for `key`, preferring backend metadata.
///
/// Metadata that is empty or `application/octet-stream` is ignored in favour
/// of the extension: first a fixed table of image and document types, then
/// the system MIME database.
pub fn content_type_for(key: &str, metadata: &str) -> String {
    if !metadata.is_empty() && metadata != OCTET_STREAM {
        return metadata.to_string();
    }

    // Everything after the last dot of the final segment, so `.png` counts
    let name = key.rsplit_once('/').map_or(key, |(_, name)| name);
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let known = match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    };
    if let Some(content_type) = known {
        return content_type.to_string();
    }

    if ext.is_empty() {
        return OCTET_STREAM.to_string();
    }
    mime_guess::from_ext(&ext)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// Reads `<root>/<container>/<key>` from the local filesystem
#[derive(Debug, Clone)]
pub struct FsStorageReader {
    root: PathBuf,
}

impl FsStorageReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, container: &str, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !plain || key.contains('\\') {
            return None;
        }
        Some(self.root.join(container).join(relative))
    }
}

#[async_trait]
impl StorageReader for FsStorageReader {
    async fn read_object(
        &self,
        container: &str,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<StorageReadResult, StorageError> {
        let path = self.object_path(container, key).ok_or(StorageError::NotFound)?;

        let content = tokio::select! {
            _ = cancel.cancelled() => return Err(StorageError::Cancelled),
            read = tokio::fs::read(&path) => match read {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(StorageError::NotFound),
                Err(e) => return Err(StorageError::Io(e)),
            },
        };

        Ok(StorageReadResult {
            content: Bytes::from(content),
            content_type: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every key it is asked for
    struct RecordingReader {
        seen: Mutex<Vec<String>>,
        outcome: fn(&CancellationToken) -> Result<StorageReadResult, StorageError>,
    }

    impl RecordingReader {
        fn new(outcome: fn(&CancellationToken) -> Result<StorageReadResult, StorageError>) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                outcome,
            })
        }
    }

    #[async_trait]
    impl StorageReader for RecordingReader {
        async fn read_object(
            &self,
            _container: &str,
            key: &str,
            cancel: &CancellationToken,
        ) -> Result<StorageReadResult, StorageError> {
            self.seen.lock().unwrap().push(key.to_string());
            (self.outcome)(cancel)
        }
    }

    fn png_bytes(_: &CancellationToken) -> Result<StorageReadResult, StorageError> {
        Ok(StorageReadResult {
            content: Bytes::from_static(b"\x89PNG"),
            content_type: String::new(),
        })
    }

    fn backend_failure(_: &CancellationToken) -> Result<StorageReadResult, StorageError> {
        Err(StorageError::Backend("connection reset".to_string()))
    }

    fn missing(_: &CancellationToken) -> Result<StorageReadResult, StorageError> {
        Err(StorageError::NotFound)
    }

    #[tokio::test]
    async fn test_traversal_never_reaches_reader() {
        let reader = RecordingReader::new(png_bytes);
        let service = StorageService::new(reader.clone(), "images", "/storage/images/");

        for key in ["", "../secret.png", "a/../../b.png", "..", "photos/..hidden"] {
            let result = service.serve(key, &CancellationToken::new()).await;
            assert_eq!(result, Err(ServeError::NotFound), "key {:?}", key);
        }
        assert!(reader.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_serves_with_extension_content_type() {
        let reader = RecordingReader::new(png_bytes);
        let service = StorageService::new(reader.clone(), "images", "/storage/images");

        let served = service.serve("products/logo.PNG", &CancellationToken::new()).await.unwrap();
        assert_eq!(served.content_type, "image/png");
        assert_eq!(served.content, Bytes::from_static(b"\x89PNG"));
        assert_eq!(reader.seen.lock().unwrap().as_slice(), ["products/logo.PNG"]);
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let service = StorageService::new(RecordingReader::new(missing), "images", "/s");
        assert_eq!(service.serve("a.png", &CancellationToken::new()).await, Err(ServeError::NotFound));

        let service = StorageService::new(RecordingReader::new(backend_failure), "images", "/s");
        assert_eq!(service.serve("a.png", &CancellationToken::new()).await, Err(ServeError::Internal));

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(service.serve("a.png", &cancel).await, Err(ServeError::Cancelled));
    }

    #[test]
    fn test_route_prefix_trimmed() {
        let service = StorageService::new(RecordingReader::new(png_bytes), "images", "/storage/images/");
        assert_eq!(service.route_prefix(), "/storage/images");
        assert_eq!(service.route_pattern(), "/storage/images/*path");
        assert_eq!(service.container(), "images");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.png", "image/x-custom"), "image/x-custom");
        assert_eq!(content_type_for("a.png", OCTET_STREAM), "image/png");
        assert_eq!(content_type_for("a.JPEG", ""), "image/jpeg");
        assert_eq!(content_type_for("a.svg", ""), "image/svg+xml");
        assert_eq!(content_type_for("a.avif", ""), "image/avif");
        assert_eq!(content_type_for("doc.pdf", ""), "application/pdf");
        assert_eq!(content_type_for("notes.txt", ""), "text/plain");
        assert_eq!(content_type_for("blob", ""), OCTET_STREAM);
        assert_eq!(content_type_for("blob.zzzunknown", ""), OCTET_STREAM);
        assert_eq!(content_type_for(".png", ""), "image/png");
        assert_eq!(content_type_for("products/.webp", ""), "image/webp");
        assert_eq!(content_type_for("v1.2/blob", ""), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_fs_reader() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir_all(dir.path().join("images/products")).await.unwrap();
        tokio::fs::write(dir.path().join("images/products/a.webp"), b"RIFF").await.unwrap();

        let reader = FsStorageReader::new(dir.path());
        let cancel = CancellationToken::new();

        let result = reader.read_object("images", "products/a.webp", &cancel).await.unwrap();
        assert_eq!(result.content, Bytes::from_static(b"RIFF"));

        let err = reader.read_object("images", "products/b.webp", &cancel).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));

        let err = reader.read_object("images", "/etc/passwd", &cancel).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));

        let service = StorageService::new(Arc::new(reader), "images", "/storage/images");
        let served = service.serve("products/a.webp", &cancel).await.unwrap();
        assert_eq!(served.content_type, "image/webp");
    }
}
