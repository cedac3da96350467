//! Image storage backends.
//!
//! One interface, three variants, selected by configuration at process
//! start. Only the local filesystem backend actually moves bytes; the
//! Supabase and MinIO variants are configuration-driven placeholders whose
//! transfer operations return [`StorageError::NotImplemented`] instead of
//! pretending to succeed with fabricated URLs.
//!
//! The backend is constructed once during startup and handed to the
//! application state explicitly - no import-time globals, so a bad remote
//! configuration is discovered before the server accepts traffic.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::StorageConfig;

/// Default file extension when an upload carries no usable filename.
const DEFAULT_EXTENSION: &str = "jpg";

/// Errors produced by storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The selected backend does not implement this operation.
    #[error("{backend} storage backend is not implemented")]
    NotImplemented { backend: &'static str },

    /// Local filesystem failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image storage, polymorphic over the configured backend.
#[derive(Debug, Clone)]
pub enum ImageStorage {
    Local(LocalStorage),
    Supabase(SupabaseStorage),
    Minio(MinioStorage),
}

impl ImageStorage {
    /// Builds the storage backend selected by configuration.
    ///
    /// Credential validation happened during config loading; construction
    /// itself cannot fail.
    pub fn from_config(config: StorageConfig) -> Self {
        match config {
            StorageConfig::Local {
                base_path,
                base_url,
            } => ImageStorage::Local(LocalStorage {
                base_path,
                base_url,
            }),
            StorageConfig::Supabase { url, bucket, .. } => {
                ImageStorage::Supabase(SupabaseStorage { url, bucket })
            }
            StorageConfig::Minio { endpoint, bucket } => {
                ImageStorage::Minio(MinioStorage { endpoint, bucket })
            }
        }
    }

    /// Name of the active backend, for startup logging.
    pub fn backend_name(&self) -> &'static str {
        match self {
            ImageStorage::Local(_) => "local",
            ImageStorage::Supabase(_) => "supabase",
            ImageStorage::Minio(_) => "minio",
        }
    }

    /// Uploads an image for a product and returns its public URL.
    ///
    /// The stored filename is the product id plus the original file's
    /// extension ("jpg" when none is given).
    pub async fn upload_image(
        &self,
        data: &[u8],
        original_filename: Option<&str>,
        product_id: &str,
    ) -> Result<String, StorageError> {
        match self {
            ImageStorage::Local(local) => local.upload_image(data, original_filename, product_id).await,
            ImageStorage::Supabase(_) => Err(StorageError::NotImplemented { backend: "supabase" }),
            ImageStorage::Minio(_) => Err(StorageError::NotImplemented { backend: "minio" }),
        }
    }

    /// Deletes an image by its URL.
    ///
    /// ## Returns
    /// * `Ok(true)` - The image existed and was removed
    /// * `Ok(false)` - Nothing to delete
    pub async fn delete_image(&self, image_url: &str) -> Result<bool, StorageError> {
        match self {
            ImageStorage::Local(local) => local.delete_image(image_url).await,
            ImageStorage::Supabase(_) => Err(StorageError::NotImplemented { backend: "supabase" }),
            ImageStorage::Minio(_) => Err(StorageError::NotImplemented { backend: "minio" }),
        }
    }

    /// Resolves a stored image path to its public URL.
    ///
    /// Pure URL construction; available on every backend.
    pub fn image_url(&self, image_path: &str) -> String {
        match self {
            ImageStorage::Local(local) => format!("{}/{}", local.base_url, image_path),
            ImageStorage::Supabase(supabase) => format!(
                "{}/storage/v1/object/public/{}/{}",
                supabase.url, supabase.bucket, image_path
            ),
            ImageStorage::Minio(minio) => {
                format!("http://{}/{}/{}", minio.endpoint, minio.bucket, image_path)
            }
        }
    }
}

// =============================================================================
// Local Filesystem Backend
// =============================================================================

/// Writes images to a local directory, keyed by product id.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    async fn upload_image(
        &self,
        data: &[u8],
        original_filename: Option<&str>,
        product_id: &str,
    ) -> Result<String, StorageError> {
        let extension = original_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_EXTENSION);
        let filename = format!("{product_id}.{extension}");

        tokio::fs::create_dir_all(&self.base_path).await?;
        tokio::fs::write(self.base_path.join(&filename), data).await?;

        debug!(filename = %filename, "Stored image");
        Ok(format!("{}/{}", self.base_url, filename))
    }

    async fn delete_image(&self, image_url: &str) -> Result<bool, StorageError> {
        let Some(filename) = image_url.rsplit('/').next().filter(|f| !f.is_empty()) else {
            return Ok(false);
        };

        match tokio::fs::remove_file(self.base_path.join(filename)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

// =============================================================================
// Remote Backends (configuration-driven placeholders)
// =============================================================================

/// Supabase object storage. URL resolution works; transfer does not.
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    url: String,
    bucket: String,
}

/// MinIO object storage. URL resolution works; transfer does not.
#[derive(Debug, Clone)]
pub struct MinioStorage {
    endpoint: String,
    bucket: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use std::env;

    fn local_storage(dir: &Path) -> ImageStorage {
        ImageStorage::from_config(StorageConfig::Local {
            base_path: dir.to_path_buf(),
            base_url: "http://localhost:8000/static".to_string(),
        })
    }

    fn scratch_dir(name: &str) -> PathBuf {
        env::temp_dir().join(format!("cardfolio-storage-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn test_local_upload_and_delete_round_trip() {
        let dir = scratch_dir("round-trip");
        let storage = local_storage(&dir);

        let url = storage
            .upload_image(b"image-bytes", Some("charizard.png"), "prod-1")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:8000/static/prod-1.png");
        assert_eq!(
            tokio::fs::read(dir.join("prod-1.png")).await.unwrap(),
            b"image-bytes"
        );

        assert!(storage.delete_image(&url).await.unwrap());
        // Second delete finds nothing
        assert!(!storage.delete_image(&url).await.unwrap());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_local_upload_defaults_to_jpg() {
        let dir = scratch_dir("default-ext");
        let storage = local_storage(&dir);

        let url = storage.upload_image(b"x", None, "prod-2").await.unwrap();
        assert!(url.ends_with("prod-2.jpg"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_remote_backends_refuse_transfer() {
        let supabase = ImageStorage::from_config(StorageConfig::Supabase {
            url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            bucket: "card-images".to_string(),
        });

        let err = supabase.upload_image(b"x", None, "prod-3").await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::NotImplemented { backend: "supabase" }
        ));
        assert!(supabase.delete_image("whatever").await.is_err());

        // URL resolution is pure construction and still works
        assert_eq!(
            supabase.image_url("prod-3.jpg"),
            "https://example.supabase.co/storage/v1/object/public/card-images/prod-3.jpg"
        );

        let minio = ImageStorage::from_config(StorageConfig::Minio {
            endpoint: "localhost:9000".to_string(),
            bucket: "card-images".to_string(),
        });
        assert!(minio.upload_image(b"x", None, "prod-4").await.is_err());
        assert_eq!(
            minio.image_url("prod-4.jpg"),
            "http://localhost:9000/card-images/prod-4.jpg"
        );
    }
}
