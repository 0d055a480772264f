use crate::error::CoreError;
use crate::service::bootstrap::AssetSource;
use std::path::Path;
use tracing::debug;

/// Reads bootstrap assets from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssets;

impl AssetSource for FsAssets {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, CoreError> {
        let bytes = tokio::fs::read(path).await?;
        debug!(path = %path.display(), size = bytes.len(), "asset loaded");
        Ok(bytes)
    }
}
