use tower_http::cors::CorsLayer;

/// The monitoring page and stress tools may be served from anywhere
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
