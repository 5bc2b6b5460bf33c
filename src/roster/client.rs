use crate::config::{RosterConfig, SheetConfig};
use crate::roster::{CourseList, LogRow, Roster, RosterError, SignInReply};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_derive::Serialize;
use tracing::debug;

/// Talks to the roster service and the attendance sheet over HTTP.
///
/// Every request carries the timeout of the service it targets, there are no retries.
#[derive(Clone)]
pub struct HttpRoster {
    client: reqwest::Client,
    roster: RosterConfig,
    sheet: SheetConfig,
}

#[derive(Serialize)]
struct AppendPayload<'a> {
    values: &'a LogRow,
    recorded_at: DateTime<Utc>,
}

impl HttpRoster {
    pub fn new(roster: RosterConfig, sheet: SheetConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            roster,
            sheet,
        }
    }

    fn roster_url(&self, path: &str) -> String {
        format!("{}/{}", self.roster.url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RosterError> {
        let resp = self
            .client
            .get(self.roster_url(path))
            .query(query)
            .timeout(self.roster.timeout)
            .send()
            .await
            .map_err(RosterError::Transport)?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(RosterError::NotFound),
            status if !status.is_success() => Err(RosterError::Status(status)),
            _ => resp.json::<T>().await.map_err(RosterError::Decode),
        }
    }
}

#[async_trait]
impl Roster for HttpRoster {
    async fn list_courses(&self, cwid: &str) -> Result<CourseList, RosterError> {
        self.get_json("courses", &[("cwid", cwid)]).await
    }

    async fn sign_in(&self, cwid: &str, course: &str) -> Result<SignInReply, RosterError> {
        self.get_json("signin", &[("cwid", cwid), ("course", course)])
            .await
    }

    async fn append_row(&self, row: &LogRow) -> Result<(), RosterError> {
        let payload = AppendPayload {
            values: row,
            recorded_at: Utc::now(),
        };

        let resp = self
            .client
            .post(&self.sheet.url)
            .json(&payload)
            .timeout(self.sheet.timeout)
            .send()
            .await
            .map_err(RosterError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RosterError::Status(status));
        }

        debug!("Appended row {} to attendance sheet", row);
        Ok(())
    }
}
