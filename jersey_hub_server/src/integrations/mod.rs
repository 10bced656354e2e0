//! Adapters between the engine's backend traits and the real hosted services.
mod cloudinary;

pub use cloudinary::CloudinaryMediaStore;
