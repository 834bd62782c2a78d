//! HTTP surface: routing, CORS, error translation and the development-only
//! OpenAPI document. With the `swagger-ui` feature, Development also serves the
//! interactive browser under [`SWAGGER_UI_PATH`].

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::framework::MediatorClient;
use crate::lifecycle::{Environment, Settings};

pub mod activities;
pub mod error;
mod swagger;

pub use error::{ApiError, ErrorBody};
pub use swagger::ApiDoc;

/// Path of the OpenAPI document, served only in [`Environment::Development`].
pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

/// Mount point of the interactive API browser (`swagger-ui` feature).
pub const SWAGGER_UI_PATH: &str = "/swagger";

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub mediator: MediatorClient,
}

/// Builds the cross-origin policy: one allowed origin, any method, any header.
///
/// An origin that is not a valid header value allows nothing and is logged.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(origin, error = %e, "invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState, settings: &Settings) -> Router {
    let mut app = Router::new()
        .nest("/api/activities", activities::router())
        .with_state(state);

    if settings.environment == Environment::Development {
        app = with_api_doc(app);
    }

    app.layer(cors_layer(&settings.cors_origin))
        .layer(TraceLayer::new_for_http())
}

#[cfg(not(feature = "swagger-ui"))]
fn with_api_doc(app: Router) -> Router {
    use axum::routing::get;
    use axum::Json;

    app.route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}

// SwaggerUi serves the document at OPENAPI_PATH as well as the browser.
#[cfg(feature = "swagger-ui")]
fn with_api_doc(app: Router) -> Router {
    use utoipa_swagger_ui::SwaggerUi;

    app.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
