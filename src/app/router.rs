use crate::app::{api::v1, state::State};
use axum::{extract::Extension, routing::get, Router};
use svc_utils::middleware::{LogLayer, MeteredRoute};
use tower_http::cors::CorsLayer;

pub fn router<S: State>(state: S) -> Router {
    let mut router = api_router::<S>();

    if state.config().diagnostics {
        router = router.merge(diagnostics_router::<S>());
    }

    router
        .fallback(v1::spa::fallback::<S>)
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(LogLayer::new())
}

fn api_router<S: State>() -> Router {
    Router::new()
        .metered_route("/healthz", get(v1::healthz))
        .metered_route("/getcourses", get(v1::courses::get_courses::<S>))
        .metered_route("/signin", get(v1::signin::sign_in::<S>))
        .metered_route("/noncwidsignin", get(v1::noncwid::log_non_cwid::<S>))
}

fn diagnostics_router<S: State>() -> Router {
    Router::new().route("/debug", get(v1::debug::debug::<S>))
}
