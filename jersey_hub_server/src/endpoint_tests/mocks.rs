use jersey_hub_engine::traits::{MediaStore, MediaStoreError, StoredImage};
use mockall::mock;

mock! {
    pub Media {}
    impl MediaStore for Media {
        async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<StoredImage, MediaStoreError>;
        async fn delete_image(&self, public_id: &str) -> Result<(), MediaStoreError>;
        fn extract_public_id(&self, image_url: &str) -> Result<String, MediaStoreError>;
    }
}
