use std::sync::Arc;

use chrono::Utc;
use log::*;
use reqwest::{multipart, Client};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::{config::CloudinaryConfig, data_objects::{DestroyResponse, UploadResponse}, CloudinaryApiError};

#[derive(Clone)]
pub struct CloudinaryApi {
    config: CloudinaryConfig,
    client: Arc<Client>,
}

impl CloudinaryApi {
    pub fn new(config: CloudinaryConfig) -> Result<Self, CloudinaryApiError> {
        let client = Client::builder().build().map_err(|e| CloudinaryApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, action: &str) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/image/{action}", self.config.cloud_name)
    }

    /// Upload an image using the configured unsigned upload preset.
    ///
    /// This is the same call the admin portal makes from the browser; no secret is involved.
    pub async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadResponse, CloudinaryApiError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());
        let url = self.url("upload");
        trace!("Uploading {filename} to {url}");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CloudinaryApiError::RestResponseError(e.to_string()))?;
        let result: UploadResponse = parse_response(response).await?;
        info!("Uploaded {filename} as {}", result.public_id);
        Ok(result)
    }

    /// Delete an image by public id.
    ///
    /// Deletion must be signed with the API secret, which is why this call only ever runs behind the proxy.
    pub async fn destroy(&self, public_id: &str) -> Result<DestroyResponse, CloudinaryApiError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);
        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature", signature.as_str()),
        ];
        let url = self.url("destroy");
        debug!("Requesting deletion of {public_id}");
        let response = self
            .client
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(|e| CloudinaryApiError::RestResponseError(e.to_string()))?;
        let result: DestroyResponse = parse_response(response).await?;
        if result.is_ok() {
            info!("Deleted image {public_id}");
            Ok(result)
        } else {
            Err(CloudinaryApiError::DestroyRejected(result.result))
        }
    }

    /// Sign a parameter set the way Cloudinary expects: the parameters sorted by name, serialized as a query string,
    /// with the API secret appended, then hashed. Cloudinary detects the digest algorithm from the signature length.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by_key(|(k, _)| *k);
        let to_sign =
            sorted.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&");
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.reveal().as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CloudinaryApiError> {
    if response.status().is_success() {
        trace!("Cloudinary call successful. {}", response.status());
        response.json::<T>().await.map_err(|e| CloudinaryApiError::JsonError(e.to_string()))
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.map_err(|e| CloudinaryApiError::RestResponseError(e.to_string()))?;
        Err(CloudinaryApiError::QueryError { status, message })
    }
}
