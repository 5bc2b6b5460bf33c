use crate::app::{
    api::{
        v1::{json_response, query_params, required},
        AppError, AppResult,
    },
    error::ErrorKind,
    state::State,
};
use axum::extract::{rejection::QueryRejection, Extension, Query};
use http::StatusCode;
use serde_derive::Deserialize;
use tracing::{error, info};

#[derive(Deserialize, Debug, Default)]
pub struct CoursesQuery {
    cwid: Option<String>,
}

pub async fn get_courses<S: State>(
    Extension(state): Extension<S>,
    query: Result<Query<CoursesQuery>, QueryRejection>,
) -> AppResult {
    let query = query_params(query)?;
    info!(?query, "/getcourses");
    do_get_courses(state, query).await
}

async fn do_get_courses<S: State>(state: S, query: CoursesQuery) -> AppResult {
    let cwid = required(query.cwid, "cwid")?;

    let courses = match state.roster().list_courses(&cwid).await {
        Ok(courses) => courses,
        Err(e) if e.is_not_found() => {
            return Err(AppError::new(
                ErrorKind::CwidNotFound,
                anyhow::Error::from(e),
            ));
        }
        Err(e) => {
            let err = AppError::new(
                ErrorKind::RosterRequestFailed,
                anyhow::Error::from(e).context("Failed to list courses"),
            );
            error!(error = %err, cwid = %cwid, "Failed to get courses");
            err.notify_sentry();
            return Err(err);
        }
    };

    json_response(StatusCode::OK, &courses, "course list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_courses_returns_roster_payload() {
        let courses = json!([
            {"course": "CS101", "title": "Intro to Programming"},
            {"course": "CS240", "title": "Data Structures"}
        ]);
        let state = TestState::new(TestRoster::new().with_courses(courses.clone()));
        let query = CoursesQuery {
            cwid: Some("123".to_string()),
        };

        let resp = do_get_courses(state, query)
            .await
            .expect("Failed to get courses");

        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = read_json(resp).await;
        assert_eq!(body, courses);
    }

    #[tokio::test]
    async fn get_courses_requires_cwid() {
        let state = TestState::new(TestRoster::new().with_courses(json!([])));

        let err = do_get_courses(state, CoursesQuery::default())
            .await
            .err()
            .expect("Missing cwid must fail");

        assert_eq!(err.kind(), ErrorKind::MissingParameter);
        assert_eq!(err.kind().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_courses_unknown_cwid() {
        let state = TestState::new(TestRoster::new());
        let query = CoursesQuery {
            cwid: Some("999".to_string()),
        };

        let err = do_get_courses(state, query)
            .await
            .err()
            .expect("Unknown cwid must fail");

        assert_eq!(err.kind(), ErrorKind::CwidNotFound);
    }
}
