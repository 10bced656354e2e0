use serde::{Deserialize, Serialize};

/// The subset of Cloudinary's upload response the storefront cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub public_id: String,
    /// The https delivery URL. This is what gets stored on the product document.
    pub secure_url: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestroyResponse {
    /// "ok" on success, "not found" when the public id does not exist.
    pub result: String,
}

impl DestroyResponse {
    pub fn is_ok(&self) -> bool {
        self.result == "ok"
    }
}
