use std::io::Cursor;
use std::sync::Arc;

use image::imageops::FilterType;
use tracing::info;

use mammoscan_common::ObjectLocation;

use crate::error::{ObjectStoreError, ResizeError};
use crate::storage::ObjectStore;

pub const ORIGINAL_PREFIX: &str = "downloaded/original";
pub const RESIZED_PREFIX: &str = "downloaded/resized";

/// Geometry the classifier was trained on (width x height).
pub const TARGET_WIDTH: u32 = 150;
pub const TARGET_HEIGHT: u32 = 300;

#[derive(Clone)]
pub struct ResizeService {
    object_store: Arc<dyn ObjectStore>,
}

impl ResizeService {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        Self { object_store }
    }

    /// Fetches the raw upload, resizes it to the classifier geometry and
    /// republishes it under the resized prefix.
    pub async fn resize(
        &self,
        bucket: &str,
        filename: &str,
    ) -> Result<ObjectLocation, ResizeError> {
        let source_key = format!("{}/{}", ORIGINAL_PREFIX, filename);

        let content = self
            .object_store
            .get(bucket, &source_key)
            .await
            .map_err(|err| match err {
                ObjectStoreError::NotFound { bucket, key } => {
                    ResizeError::SourceNotFound { bucket, key }
                }
                other => ResizeError::Read(other),
            })?;

        let resized = resize_image_bytes(&content)?;

        let target_key = format!("{}/{}", RESIZED_PREFIX, filename);
        self.object_store
            .put(bucket, &target_key, &resized)
            .await
            .map_err(ResizeError::Write)?;

        info!(bucket = %bucket, key = %target_key, "resized image published");

        Ok(ObjectLocation::new(bucket, target_key))
    }
}

/// Decodes, resizes to the fixed target geometry and re-encodes in the
/// source format.
fn resize_image_bytes(content: &[u8]) -> Result<Vec<u8>, ResizeError> {
    let format = image::guess_format(content).map_err(ResizeError::Decode)?;
    let decoded =
        image::load_from_memory_with_format(content, format).map_err(ResizeError::Decode)?;

    let resized = decoded.resize_exact(TARGET_WIDTH, TARGET_HEIGHT, FilterType::Triangle);

    let mut encoded = Cursor::new(Vec::new());
    resized
        .write_to(&mut encoded, format)
        .map_err(ResizeError::Encode)?;

    Ok(encoded.into_inner())
}
