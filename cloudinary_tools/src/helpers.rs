use regex::Regex;

use crate::CloudinaryApiError;

/// Extract the public id from a Cloudinary delivery URL.
///
/// Delivery URLs look like `https://res.cloudinary.com/demo/image/upload/v1712345678/folder/asset.png`; the public
/// id is everything between the `/v<digits>/` version marker and the (optional) file extension, `folder/asset` here.
/// A URL without a version marker is rejected rather than guessed at, since deleting the wrong asset is worse than
/// deleting none.
pub fn extract_public_id(image_url: &str) -> Result<String, CloudinaryApiError> {
    let re = Regex::new(r"/v\d+/(.*?)(\.[a-zA-Z0-9]+)?$").unwrap();
    re.captures(image_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CloudinaryApiError::InvalidImageUrl(image_url.to_string()))
}
