use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MediaStoreError {
    #[error("Image upload failed. {0}")]
    UploadFailed(String),
    #[error("Image deletion failed. {0}")]
    DeleteFailed(String),
    #[error("Could not derive a public id from the image URL. {0}")]
    InvalidImageUrl(String),
}

/// An uploaded image as the host reports it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// The delivery URL stored on the product document. Embeds the public id.
    pub url: String,
    pub public_id: String,
}

/// The hosted image CDN.
///
/// The host's URL format is its own contract, so deriving the public id needed for deletion from a stored delivery
/// URL belongs behind this trait too.
#[allow(async_fn_in_trait)]
pub trait MediaStore {
    async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<StoredImage, MediaStoreError>;

    async fn delete_image(&self, public_id: &str) -> Result<(), MediaStoreError>;

    fn extract_public_id(&self, image_url: &str) -> Result<String, MediaStoreError>;
}
