use std::time::Duration;

use actix_web::{
    dev::{Server, Service},
    http::{header, KeepAlive},
    middleware::Logger,
    web,
    App,
    HttpServer,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::CloudinaryMediaStore,
    routes::{delete_image, health, method_not_allowed},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let media = CloudinaryMediaStore::new(config.cloudinary.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, media)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<M>(config: ServerConfig, media: M) -> Result<Server, ServerError>
where M: jersey_hub_engine::traits::MediaStore + Clone + Send + Sync + 'static {
    let srv = HttpServer::new(move || {
        let allowed_origin = config.allowed_origin.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("jh::access_log"))
            .wrap_fn(move |req, srv| {
                // The storefront runs on a different origin in development, so every response carries CORS headers
                // for the single configured origin.
                let allowed_origin = allowed_origin.clone();
                let fut = srv.call(req);
                async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    if let Ok(origin) = header::HeaderValue::from_str(&allowed_origin) {
                        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                    }
                    headers.insert(
                        header::ACCESS_CONTROL_ALLOW_HEADERS,
                        header::HeaderValue::from_static("Content-Type"),
                    );
                    Ok(res)
                }
            })
            .app_data(web::Data::new(media.clone()))
            .service(health)
            .service(
                web::resource("/api/delete-image")
                    .route(web::post().to(delete_image::<M>))
                    .route(web::route().to(method_not_allowed)),
            )
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
