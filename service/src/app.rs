//! Router assembly, shared by the production binary and the test harness.

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{CorsConfig, SwaggerConfig};
use crate::rest::{self, ApiDoc};
use crate::state::AppState;

// Health check handler
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Build the CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = &config.allowed_origins;
    let allow_origin: AllowOrigin = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?origins, "CORS allowed origins configured");
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

/// Assemble the full application router.
#[must_use]
pub fn build_router(state: AppState, cors: &CorsConfig, swagger: &SwaggerConfig) -> Router {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let api = Router::new()
        .route("/members", post(rest::add_member))
        .route("/members/{principal}", get(rest::get_member))
        .route("/bills", post(rest::propose_bill).get(rest::get_bill_history))
        .route("/bills/{index}", get(rest::get_bill))
        .route("/bills/{index}/votes", post(rest::cast_vote))
        .route(
            "/nominations",
            post(rest::nominate_member).get(rest::get_nominations),
        )
        .route(
            "/nominations/{candidate}/ratifications",
            post(rest::ratify_member),
        );

    let mut app = Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_check))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors))
        .with_state(state);

    if swagger.enabled {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app
}
