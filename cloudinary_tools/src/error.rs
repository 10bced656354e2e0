use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudinaryApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Cloudinary refused to delete the image: {0}")]
    DestroyRejected(String),
    #[error("Not a Cloudinary delivery URL: {0}")]
    InvalidImageUrl(String),
}
