use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

use super::auth::INIT_DATA_HEADER;

/// The Mini App is served from its own origin and calls the API cross-site.
pub fn mini_app_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(INIT_DATA_HEADER),
        ])
        .allow_origin(Any)
}
