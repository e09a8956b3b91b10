mod docs;
mod health;
/// Receipt upload operations
pub mod receipts;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};
use tower_http::cors::{Any, CorsLayer};

/// Creates the router with all handler routes
///
/// The web client is served from a different origin, so every response
/// carries a wildcard CORS header.
pub fn handler() -> ApiRouter {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/v1/receipts", post(receipts::upload_receipt))
        .api_route(
            "/v1/receipts/upload-url",
            post(receipts::create_camera_upload_url),
        )
        .layer(cors)
}
