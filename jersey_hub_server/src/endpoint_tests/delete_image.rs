use actix_web::{
    body::MessageBody,
    http::{header, Method, StatusCode},
    test::{call_service, init_service, TestRequest},
    web,
    App,
};
use jersey_hub_engine::traits::MediaStoreError;
use serde_json::{json, Value};

use crate::{
    endpoint_tests::mocks::MockMedia,
    routes::{delete_image, method_not_allowed},
};

async fn call(media: MockMedia, method: Method, body: Option<Value>) -> (StatusCode, Value) {
    let _ = env_logger::try_init().ok();
    let app = init_service(
        App::new().app_data(web::Data::new(media)).service(
            web::resource("/api/delete-image")
                .route(web::post().to(delete_image::<MockMedia>))
                .route(web::route().to(method_not_allowed)),
        ),
    )
    .await;
    let mut request = TestRequest::with_uri("/api/delete-image").method(method);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = call_service(&app, request.to_request()).await;
    let status = response.status();
    let bytes = response.into_body().try_into_bytes().expect("body was not ready");
    let body: Value = serde_json::from_slice(&bytes).expect("response was not JSON");
    (status, body)
}

#[actix_web::test]
async fn a_valid_request_deletes_the_image() {
    let mut media = MockMedia::new();
    media
        .expect_delete_image()
        .withf(|public_id| public_id == "jerseys/home-kit")
        .times(1)
        .returning(|_| Ok(()));
    let (status, body) = call(media, Method::POST, Some(json!({ "publicId": "jerseys/home-kit" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Image deleted successfully.");
}

#[actix_web::test]
async fn a_missing_public_id_is_a_400() {
    let mut media = MockMedia::new();
    media.expect_delete_image().times(0);
    let (status, body) = call(media, Method::POST, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Public ID is required.");
}

#[actix_web::test]
async fn a_blank_public_id_is_a_400() {
    let mut media = MockMedia::new();
    media.expect_delete_image().times(0);
    let (status, body) = call(media, Method::POST, Some(json!({ "publicId": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Public ID is required.");
}

#[actix_web::test]
async fn a_malformed_body_is_a_400() {
    let mut media = MockMedia::new();
    media.expect_delete_image().times(0);
    let (status, body) = call(media, Method::POST, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Public ID is required.");
}

#[actix_web::test]
async fn any_other_verb_is_a_405() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::OPTIONS] {
        let mut media = MockMedia::new();
        media.expect_delete_image().times(0);
        let (status, body) = call(media, method.clone(), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} should not be allowed");
        assert_eq!(body["error"], "Method Not Allowed");
    }
}

#[actix_web::test]
async fn the_405_carries_an_allow_header() {
    let _ = env_logger::try_init().ok();
    let media = MockMedia::new();
    let app = init_service(App::new().app_data(web::Data::new(media)).service(
        web::resource("/api/delete-image")
            .route(web::post().to(delete_image::<MockMedia>))
            .route(web::route().to(method_not_allowed)),
    ))
    .await;
    let response = call_service(&app, TestRequest::with_uri("/api/delete-image").to_request()).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).and_then(|v| v.to_str().ok()), Some("POST"));
}

#[actix_web::test]
async fn an_upstream_failure_is_a_500() {
    let mut media = MockMedia::new();
    media
        .expect_delete_image()
        .times(1)
        .returning(|_| Err(MediaStoreError::DeleteFailed("upstream said no".to_string())));
    let (status, body) = call(media, Method::POST, Some(json!({ "publicId": "jerseys/home-kit" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Failed to delete image."));
}
