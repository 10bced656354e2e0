//! # JerseyHub server
//! This module hosts the storefront's server-side companion. It is responsible for:
//! Proxying image-deletion requests to the image host so the host's API secret never reaches a browser.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/delete-image`: POST-only. Deletes the image with the given public id from the image host.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
