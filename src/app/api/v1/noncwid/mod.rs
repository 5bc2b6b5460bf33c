use crate::{
    app::{
        api::{
            v1::{json_response, query_params, required, Reply},
            AppError, AppResult,
        },
        error::ErrorKind,
        metrics::SIGNIN_METRICS,
        state::State,
    },
    roster::LogRow,
};
use axum::extract::{rejection::QueryRejection, Extension, Query};
use http::StatusCode;
use serde_derive::Deserialize;
use tracing::{error, info};

#[derive(Deserialize, Debug, Default)]
pub struct NonCwidQuery {
    course: Option<String>,
    #[serde(rename = "nonCWIDStatus")]
    non_cwid_status: Option<String>,
    name: Option<String>,
}

/// Logs a student without a CWID straight to the sheet. No roster sign-in happens.
pub async fn log_non_cwid<S: State>(
    Extension(state): Extension<S>,
    query: Result<Query<NonCwidQuery>, QueryRejection>,
) -> AppResult {
    let query = query_params(query)?;
    info!(?query, "/noncwidsignin");
    do_log_non_cwid(state, query).await
}

async fn do_log_non_cwid<S: State>(state: S, query: NonCwidQuery) -> AppResult {
    let course = required(query.course, "course")?;
    let status = required(query.non_cwid_status, "nonCWIDStatus")?;
    let name = required(query.name, "name")?;

    let row = LogRow::non_cwid(&course, &status, &name);

    if let Err(e) = state.roster().append_row(&row).await {
        SIGNIN_METRICS.sheet_append_failed();

        let err = AppError::new(
            ErrorKind::SheetAppendFailed,
            anyhow::Error::from(e).context(format!("Failed to log {} to sheet", row)),
        );
        error!(error = %err, "Failed to log non-CWID sign in");
        err.notify_sentry();
        return Err(err);
    }

    json_response(StatusCode::OK, &Reply::ok(), "non-CWID sign in reply")
}
