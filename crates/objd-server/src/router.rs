use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::service::ObjectService;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the axum router with all object endpoints.
pub fn build_router(service: ObjectService) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            let id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %id,
            )
        }))
        .layer(PropagateRequestIdLayer::new(request_id));

    Router::new()
        .route("/api/objects", get(handler::list_objects))
        .route("/api/objects/", get(handler::list_objects))
        .route(
            "/api/objects/:id",
            get(handler::get_object)
                .put(handler::put_object)
                .delete(handler::delete_object),
        )
        .fallback(handler::fallback)
        .layer(middleware)
        .with_state(service)
}
