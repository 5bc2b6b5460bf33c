use crate::{
    app::{
        api::{
            v1::{json_response, present, Reply},
            AppResult,
        },
        error::{Error, ErrorKind},
        metrics::SIGNIN_METRICS,
        state::State,
    },
    roster::LogRow,
};
use axum::extract::{rejection::QueryRejection, Extension, Query};
use http::StatusCode;
use serde_derive::Deserialize;
use tracing::{error, info, warn};

pub const MISSING_PARAMETERS: &str = "Did not provide CWID or Course";
pub const CWID_NOT_FOUND: &str = "Could not find that CWID.";
pub const SHEET_LOG_FAILED: &str = "Successfully signed in but couldn't log to sheet.";

#[derive(Deserialize, Debug, Default)]
pub struct SignInQuery {
    cwid: Option<String>,
    course: Option<String>,
}

pub async fn sign_in<S: State>(
    Extension(state): Extension<S>,
    query: Result<Query<SignInQuery>, QueryRejection>,
) -> AppResult {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            warn!(error = %e, "/signin: malformed query string");
            SIGNIN_METRICS.observe(StatusCode::BAD_REQUEST);
            return json_response(
                StatusCode::BAD_REQUEST,
                &Reply::error(MISSING_PARAMETERS),
                "sign in reply",
            );
        }
    };

    info!(?query, "/signin");
    do_sign_in(state, query).await
}

async fn do_sign_in<S: State>(state: S, query: SignInQuery) -> AppResult {
    let (status, reply) = match (present(query.cwid), present(query.course)) {
        (Some(cwid), Some(course)) => sign_in_with_roster(&state, &cwid, &course).await,
        _ => (StatusCode::BAD_REQUEST, Reply::error(MISSING_PARAMETERS)),
    };

    SIGNIN_METRICS.observe(status);
    json_response(status, &reply, "sign in reply")
}

async fn sign_in_with_roster<S: State>(
    state: &S,
    cwid: &str,
    course: &str,
) -> (StatusCode, Reply) {
    // Every roster fault looks the same to the client
    let roster_reply = match state.roster().sign_in(cwid, course).await {
        Ok(reply) => reply,
        Err(e) if e.is_not_found() => {
            warn!(cwid, course, "CWID not found in roster");
            return (StatusCode::NOT_FOUND, Reply::error(CWID_NOT_FOUND));
        }
        Err(e) => {
            error!(error = %e, cwid, course, "Roster sign in failed");
            Error::new(ErrorKind::RosterRequestFailed, anyhow::Error::from(e)).notify_sentry();
            return (StatusCode::NOT_FOUND, Reply::error(CWID_NOT_FOUND));
        }
    };

    if !roster_reply.is_success() {
        info!(cwid, course, errmessage = %roster_reply.errmessage, "Sign in rejected by roster");
        return (StatusCode::BAD_REQUEST, Reply::error(roster_reply.errmessage));
    }

    let mut reply = Reply::ok();
    let row = LogRow::signed_in(course, cwid, &roster_reply.student_name);

    if let Err(e) = state.roster().append_row(&row).await {
        error!(error = %e, %row, "Failed to log sign in to sheet");
        SIGNIN_METRICS.sheet_append_failed();
        Error::new(ErrorKind::SheetAppendFailed, anyhow::Error::from(e)).notify_sentry();
        reply.message = SHEET_LOG_FAILED.to_string();
    }

    (StatusCode::OK, reply)
}
