pub mod admin_api;
pub mod auth_api;
pub mod catalog_api;
