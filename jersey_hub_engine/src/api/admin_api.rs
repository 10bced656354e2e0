//! Admin catalog operations: create-with-image and the two-phase delete.
use chrono::Utc;
use log::*;
use thiserror::Error;

use crate::{
    catalog_types::{NewProduct, Product, ProductDocument, ProductId, ValidationError},
    traits::{MediaStore, MediaStoreError, ProductCollection, ProductCollectionError},
};

#[derive(Debug, Error)]
pub enum AdminApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Image upload failed, so no product was created. {0}")]
    ImageUpload(MediaStoreError),
    #[error("The product document could not be created. {0}")]
    DocumentCreateFailed(ProductCollectionError),
    #[error("Image deletion failed, so the product document was left in place. {0}")]
    ImageDeleteFailed(MediaStoreError),
    #[error("The image {public_id} was deleted, but removing the document failed. {source}")]
    DocumentDeleteFailed { public_id: String, source: ProductCollectionError },
    #[error("Could not derive a public id from the stored image URL. {0}")]
    InvalidImageUrl(MediaStoreError),
}

/// Orchestrates the admin flows over a collection backend and an image host.
///
/// Both flows order their two remote calls so that a failure can only strand an orphaned image, never a product
/// document pointing at a missing image. Creation uploads the image before writing the document; deletion removes
/// the image before the document and aborts if the image deletion fails.
#[derive(Clone)]
pub struct AdminApi<B, M> {
    catalog: B,
    media: M,
}

impl<B, M> AdminApi<B, M>
where
    B: ProductCollection,
    M: MediaStore,
{
    pub fn new(catalog: B, media: M) -> Self {
        Self { catalog, media }
    }

    /// Validate the form, upload the image, then write the document. The store-assigned id comes back.
    pub async fn add_product(
        &self,
        form: NewProduct,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<ProductId, AdminApiError> {
        form.validate()?;
        let stored = self.media.upload_image(image, filename).await.map_err(AdminApiError::ImageUpload)?;
        debug!("🛒️ Image uploaded as {}.", stored.public_id);
        let document = ProductDocument::new(form, stored.url, Utc::now());
        let id = self.catalog.add_product(document).await.map_err(AdminApiError::DocumentCreateFailed)?;
        info!("🛒️ Product {id} created.");
        Ok(id)
    }

    /// Best-effort two-phase delete: image first, then the document.
    ///
    /// If the image deletion fails, the document is left untouched and the product remains fully renderable. If the
    /// document deletion fails after the image is gone, the error names the orphaned public id so an operator can
    /// reconcile by hand.
    pub async fn delete_product(&self, product: &Product) -> Result<(), AdminApiError> {
        let public_id = self.media.extract_public_id(&product.image_url).map_err(AdminApiError::InvalidImageUrl)?;
        self.media.delete_image(&public_id).await.map_err(AdminApiError::ImageDeleteFailed)?;
        debug!("🛒️ Image {public_id} deleted.");
        if let Err(e) = self.catalog.delete_product(&product.id).await {
            warn!("🛒️ Product {} still exists but its image {public_id} is gone. {e}", product.id);
            return Err(AdminApiError::DocumentDeleteFailed { public_id, source: e });
        }
        info!("🛒️ Product {} deleted.", product.id);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{sample_product, MemoryCollection, MemoryMedia};

    fn form() -> NewProduct {
        NewProduct {
            name: "Home Kit".to_string(),
            team: "RedFC".to_string(),
            alt_text: "Red home jersey".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_product_uploads_then_writes() {
        let collection = MemoryCollection::new();
        let media = MemoryMedia::new();
        let api = AdminApi::new(collection.clone(), media.clone());
        let id = api.add_product(form(), vec![1, 2, 3], "home-kit.png").await.unwrap();
        let products = collection.fetch_all().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, id);
        assert!(products[0].image_url.contains("home-kit"));
        assert_eq!(media.uploads().await.len(), 1);
    }

    #[tokio::test]
    async fn an_invalid_form_never_reaches_the_image_host() {
        let media = MemoryMedia::new();
        let api = AdminApi::new(MemoryCollection::new(), media.clone());
        let mut bad = form();
        bad.name = " ".to_string();
        let err = api.add_product(bad, vec![1], "kit.png").await.unwrap_err();
        assert!(matches!(err, AdminApiError::Validation(_)));
        assert!(media.uploads().await.is_empty());
    }

    #[tokio::test]
    async fn a_failed_upload_creates_no_document() {
        let collection = MemoryCollection::new();
        let media = MemoryMedia::new();
        media.set_fail_uploads(true).await;
        let api = AdminApi::new(collection.clone(), media);
        let err = api.add_product(form(), vec![1], "kit.png").await.unwrap_err();
        assert!(matches!(err, AdminApiError::ImageUpload(_)));
        assert_eq!(collection.product_count().await, 0);
    }

    #[tokio::test]
    async fn delete_removes_image_then_document() {
        let collection = MemoryCollection::new();
        let media = MemoryMedia::new();
        let api = AdminApi::new(collection.clone(), media.clone());
        let id = api.add_product(form(), vec![1], "home-kit.png").await.unwrap();
        let product = collection.fetch_all().await.unwrap().into_iter().find(|p| p.id == id).unwrap();
        api.delete_product(&product).await.unwrap();
        assert_eq!(collection.product_count().await, 0);
        assert_eq!(media.deletions().await.len(), 1);
    }

    #[tokio::test]
    async fn a_failed_image_delete_leaves_the_document_in_place() {
        let collection = MemoryCollection::new();
        let media = MemoryMedia::new();
        let api = AdminApi::new(collection.clone(), media.clone());
        let id = api.add_product(form(), vec![1], "home-kit.png").await.unwrap();
        let product = collection.fetch_all().await.unwrap().into_iter().find(|p| p.id == id).unwrap();
        media.set_fail_deletions(true).await;
        let err = api.delete_product(&product).await.unwrap_err();
        assert!(matches!(err, AdminApiError::ImageDeleteFailed(_)));
        // The product survives untouched.
        assert_eq!(collection.product_count().await, 1);
    }

    #[tokio::test]
    async fn a_failed_document_delete_names_the_orphaned_image() {
        let media = MemoryMedia::new();
        // A product the collection has never heard of, so the document delete fails after the image is gone.
        let api = AdminApi::new(MemoryCollection::new(), media.clone());
        let product = sample_product("ghost", "Home Kit", "RedFC");
        let err = api.delete_product(&product).await.unwrap_err();
        let AdminApiError::DocumentDeleteFailed { public_id, .. } = err else {
            panic!("expected DocumentDeleteFailed, got {err}");
        };
        assert_eq!(public_id, "jerseys/ghost");
        assert_eq!(media.deletions().await, vec!["jerseys/ghost".to_string()]);
    }

    #[tokio::test]
    async fn an_unparseable_image_url_aborts_before_any_deletion() {
        let media = MemoryMedia::new();
        let api = AdminApi::new(MemoryCollection::new(), media.clone());
        let mut product = sample_product("p1", "Home Kit", "RedFC");
        product.image_url = "https://img.test/no-version/kit.png".to_string();
        let err = api.delete_product(&product).await.unwrap_err();
        assert!(matches!(err, AdminApiError::InvalidImageUrl(_)));
        assert!(media.deletions().await.is_empty());
    }
}
