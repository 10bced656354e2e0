use jh_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct CloudinaryConfig {
    /// The cloud name, i.e. the account subdomain in delivery URLs.
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret<String>,
    /// The unsigned upload preset used by the admin portal.
    pub upload_preset: String,
}

impl CloudinaryConfig {
    pub fn new_from_env_or_default() -> Self {
        let cloud_name = std::env::var("JH_CLOUDINARY_CLOUD_NAME").unwrap_or_else(|_| {
            warn!("JH_CLOUDINARY_CLOUD_NAME not set, using (probably useless) default");
            "demo".to_string()
        });
        let api_key = std::env::var("JH_CLOUDINARY_API_KEY").unwrap_or_else(|_| {
            warn!("JH_CLOUDINARY_API_KEY not set, using (probably useless) default");
            "000000000000000".to_string()
        });
        let api_secret = Secret::new(std::env::var("JH_CLOUDINARY_API_SECRET").unwrap_or_else(|_| {
            warn!("JH_CLOUDINARY_API_SECRET not set, image deletion will fail");
            String::default()
        }));
        let upload_preset = std::env::var("JH_CLOUDINARY_UPLOAD_PRESET").unwrap_or_else(|_| {
            warn!("JH_CLOUDINARY_UPLOAD_PRESET not set, using docs_upload_example as default");
            "docs_upload_example".to_string()
        });
        Self { cloud_name, api_key, api_secret, upload_preset }
    }
}
