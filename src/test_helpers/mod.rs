use axum::body::HttpBody;
use axum::response::Response;

pub mod roster;
pub mod state;

pub mod prelude {
    pub use super::{
        read_body, read_json,
        roster::{SignInScript, TestRoster},
        state::{test_config, TestState},
    };
}

pub async fn read_body(resp: Response) -> Vec<u8> {
    let mut body = resp.into_body();
    let mut buf = Vec::new();

    while let Some(chunk) = body.data().await {
        buf.extend_from_slice(&chunk.expect("Failed to get body"));
    }

    buf
}

pub async fn read_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
    let body = read_body(resp).await;
    serde_json::from_slice(&body).expect("Failed to parse body")
}
