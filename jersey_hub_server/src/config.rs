use std::env;

use cloudinary_tools::CloudinaryConfig;
use log::*;

const DEFAULT_JH_HOST: &str = "127.0.0.1";
const DEFAULT_JH_PORT: u16 = 3001;
/// The storefront dev server, which is the only browser origin that should be calling the API.
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The value sent back in `Access-Control-Allow-Origin` on every response.
    pub allowed_origin: String,
    pub cloudinary: CloudinaryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_JH_HOST.to_string(),
            port: DEFAULT_JH_PORT,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("JH_HOST").ok().unwrap_or_else(|| DEFAULT_JH_HOST.into());
        let port = env::var("JH_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for JH_PORT. {e} Using the default, {DEFAULT_JH_PORT}, instead.");
                    DEFAULT_JH_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_JH_PORT);
        let allowed_origin = env::var("JH_ALLOWED_ORIGIN").unwrap_or_else(|_| {
            warn!("🪛️ JH_ALLOWED_ORIGIN is not set. Using the default, {DEFAULT_ALLOWED_ORIGIN}.");
            DEFAULT_ALLOWED_ORIGIN.to_string()
        });
        let cloudinary = CloudinaryConfig::new_from_env_or_default();
        Self { host, port, allowed_origin, cloudinary }
    }
}
