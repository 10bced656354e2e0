//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a separate
//! module. Keep this module neat and tidy 🙏
use actix_web::{get, web, HttpResponse, Responder};
use jersey_hub_engine::traits::MediaStore;
use log::*;

use crate::{
    data_objects::{DeleteImageRequest, JsonResponse},
    errors::ServerError,
};

/// Route handler for the health check
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().content_type("text/plain").body("👕️\n")
}

/// Route handler for `POST /api/delete-image`.
///
/// The browser admin UI calls this instead of the image host directly, so the host's API secret stays on the
/// server. The body is read as raw bytes rather than through the Json extractor so a malformed body and a missing
/// public id produce the same 400 the storefront already expects.
pub async fn delete_image<M: MediaStore>(
    media: web::Data<M>,
    body: web::Bytes,
) -> Result<HttpResponse, ServerError> {
    let request = serde_json::from_slice::<DeleteImageRequest>(&body).map_err(|e| {
        debug!("💻️ Could not parse delete-image body. {e}");
        ServerError::MissingPublicId
    })?;
    let public_id = request.public_id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let Some(public_id) = public_id else {
        debug!("💻️ delete-image called without a public id.");
        return Err(ServerError::MissingPublicId);
    };
    media.delete_image(&public_id).await.map_err(|e| {
        warn!("💻️ Image deletion for {public_id} failed. {e}");
        ServerError::ImageDeletionFailed(e)
    })?;
    info!("💻️ Image {public_id} deleted.");
    Ok(HttpResponse::Ok().json(JsonResponse::new("Image deleted successfully.")))
}

/// Catch-all for `/api/delete-image` with any verb other than POST.
pub async fn method_not_allowed() -> Result<HttpResponse, ServerError> {
    Err(ServerError::MethodNotAllowed)
}
