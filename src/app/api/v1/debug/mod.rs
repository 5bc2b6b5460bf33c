use crate::app::{
    api::{v1::json_response, AppResult},
    state::State,
};
use axum::extract::Extension;
use http::StatusCode;
use serde_derive::Serialize;
use std::path::{Path, PathBuf};

const BUNDLE: &str = "build/bundle.js";

#[derive(Serialize, Debug)]
pub struct Diagnostics {
    asset_root: PathBuf,
    index_path: PathBuf,
    index_exists: bool,
    bundle_path: PathBuf,
    bundle_exists: bool,
    asset_root_contents: Contents,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
enum Contents {
    Entries(Vec<String>),
    Missing(&'static str),
}

/// Describes how static assets resolve. Only mounted with `diagnostics` enabled.
pub async fn debug<S: State>(Extension(state): Extension<S>) -> AppResult {
    let diagnostics = collect(&state).await;
    json_response(StatusCode::OK, &diagnostics, "diagnostics")
}

async fn collect<S: State>(state: &S) -> Diagnostics {
    let static_files = &state.config().static_files;
    let index_path = static_files.index_path();
    let bundle_path = static_files.root.join(BUNDLE);

    Diagnostics {
        asset_root: static_files.root.clone(),
        index_exists: exists(&index_path).await,
        index_path,
        bundle_exists: exists(&bundle_path).await,
        bundle_path,
        asset_root_contents: list_dir(&static_files.root).await,
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn list_dir(root: &Path) -> Contents {
    let mut entries = match tokio::fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(_) => return Contents::Missing("NOT FOUND"),
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Contents::Entries(names)
}
