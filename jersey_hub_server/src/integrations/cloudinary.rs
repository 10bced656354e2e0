use cloudinary_tools::{extract_public_id, CloudinaryApi, CloudinaryApiError, CloudinaryConfig};
use jersey_hub_engine::traits::{MediaStore, MediaStoreError, StoredImage};

/// [`MediaStore`] backed by the Cloudinary REST API.
#[derive(Clone)]
pub struct CloudinaryMediaStore {
    api: CloudinaryApi,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, CloudinaryApiError> {
        let api = CloudinaryApi::new(config)?;
        Ok(Self { api })
    }
}

impl MediaStore for CloudinaryMediaStore {
    async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<StoredImage, MediaStoreError> {
        let response = self
            .api
            .upload(bytes, filename)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        Ok(StoredImage { url: response.secure_url, public_id: response.public_id })
    }

    async fn delete_image(&self, public_id: &str) -> Result<(), MediaStoreError> {
        self.api.destroy(public_id).await.map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))?;
        Ok(())
    }

    fn extract_public_id(&self, image_url: &str) -> Result<String, MediaStoreError> {
        extract_public_id(image_url).map_err(|e| MediaStoreError::InvalidImageUrl(e.to_string()))
    }
}
