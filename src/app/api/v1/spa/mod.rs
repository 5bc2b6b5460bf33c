use crate::app::state::State;
use axum::{
    body::{self, Body},
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use http::{header, HeaderValue, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, error};

/// First path segments owned by the API. These never fall back to the SPA.
const API_PREFIXES: [&str; 4] = ["signin", "getcourses", "noncwidsignin", "debug"];

pub fn is_api_path(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    API_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Catch-all route: static assets, then the SPA index document.
pub async fn fallback<S: State>(Extension(state): Extension<S>, req: Request<Body>) -> Response {
    let path = req.uri().path().to_owned();

    if is_api_path(&path) {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response();
    }

    // A dot is taken to mean the path names a file
    if path.contains('.') {
        let resp = ServeDir::new(&state.config().static_files.root)
            .oneshot(req)
            .await
            .unwrap_or_else(|never| match never {});

        // Only a missing file falls back, revalidation and range statuses pass through
        if resp.status() != StatusCode::NOT_FOUND {
            return no_cache(resp.map(body::boxed));
        }

        debug!(path = %path, "Static asset not found, falling back to index");
    }

    serve_index(&state).await
}

async fn serve_index<S: State>(state: &S) -> Response {
    let static_files = &state.config().static_files;
    let index = static_files.index_path();

    let resp = ServeFile::new(&index)
        .oneshot(Request::new(Body::empty()))
        .await
        .unwrap_or_else(|never| match never {});

    if resp.status().is_success() {
        return no_cache(resp.map(body::boxed));
    }

    error!(
        index = %index.display(),
        status = %resp.status(),
        "SPA index document is not available"
    );

    let mut body = json!({ "error": "Frontend index document not found" });
    if state.config().diagnostics {
        body["asset_root"] = json!(static_files.root.display().to_string());
    }

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn no_cache(mut resp: Response) -> Response {
    resp.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    resp
}
