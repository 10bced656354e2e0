use anyhow::{anyhow, Context, Result};
use dialoguer::Confirm;
use jersey_hub_engine::{
    catalog_types::NewProduct,
    firestore::{FirestoreCollection, FirestoreConfig},
    traits::ProductCollection,
    AdminApi,
};
use jersey_hub_server::integrations::CloudinaryMediaStore;
use log::info;

use crate::{formatting::products_table, AddProductParams};

fn new_collection() -> Result<FirestoreCollection> {
    let config = FirestoreConfig::new_from_env_or_default();
    FirestoreCollection::new(config).map_err(|e| anyhow!("Error creating the Firestore client: {e}"))
}

fn new_admin_api() -> Result<AdminApi<FirestoreCollection, CloudinaryMediaStore>> {
    let cloudinary = cloudinary_tools::CloudinaryConfig::new_from_env_or_default();
    let media =
        CloudinaryMediaStore::new(cloudinary).map_err(|e| anyhow!("Error creating the Cloudinary client: {e}"))?;
    Ok(AdminApi::new(new_collection()?, media))
}

pub async fn list_products() -> Result<()> {
    let collection = new_collection()?;
    let products = collection.fetch_all().await.context("Error fetching products")?;
    println!("{} product(s)", products.len());
    products_table(&products).printstd();
    Ok(())
}

pub async fn add_product(params: AddProductParams) -> Result<()> {
    let form = NewProduct {
        name: params.name,
        team: params.team,
        brand: params.brand,
        tag: params.tag,
        alt_text: params.alt_text,
        price: params.price.into(),
        rating: params.rating.into(),
    };
    let image = tokio::fs::read(&params.image).await.with_context(|| format!("Could not read {}", params.image))?;
    let filename = params.image.rsplit('/').next().unwrap_or(params.image.as_str()).to_string();
    info!("Uploading {filename} ({} bytes)", image.len());
    let api = new_admin_api()?;
    let id = api.add_product(form, image, &filename).await.context("Error creating the product")?;
    println!("Created product {id}");
    Ok(())
}

pub async fn delete_product(id: String, yes: bool) -> Result<()> {
    let api = new_admin_api()?;
    let collection = new_collection()?;
    let products = collection.fetch_all().await.context("Error fetching products")?;
    let product = products
        .into_iter()
        .find(|p| p.id.0 == id)
        .ok_or_else(|| anyhow!("No product with id {id}"))?;
    if !yes {
        let prompt = format!("Delete \"{}\" ({}) and its image?", product.name, product.team);
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            println!("Aborted.");
            return Ok(());
        }
    }
    api.delete_product(&product).await.context("Error deleting the product")?;
    println!("Deleted product {id} ({})", product.name);
    Ok(())
}
