use async_trait::async_trait;
use http::StatusCode;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub use self::client::HttpRoster;

mod client;

/// Course list exactly as the roster service returns it.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct CourseList(serde_json::Value);

impl From<serde_json::Value> for CourseList {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Result of a sign-in attempt that reached the roster service.
///
/// A non-empty `errmessage` means the roster rejected the sign-in
/// (already signed in, not enrolled, session closed and so on).
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct SignInReply {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub errmessage: String,
}

impl SignInReply {
    pub fn signed_in(student_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            errmessage: String::new(),
        }
    }

    pub fn rejected(errmessage: impl Into<String>) -> Self {
        Self {
            student_name: String::new(),
            errmessage: errmessage.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errmessage.is_empty()
    }
}

/// One attendance row, in sheet column order.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct LogRow(Vec<String>);

impl LogRow {
    /// `[course, cwid, student name]`
    pub fn signed_in(course: &str, cwid: &str, student_name: &str) -> Self {
        Self(vec![
            course.to_owned(),
            cwid.to_owned(),
            student_name.to_owned(),
        ])
    }

    /// `[course, status tag, name]` for students without a CWID.
    pub fn non_cwid(course: &str, status: &str, name: &str) -> Self {
        Self(vec![course.to_owned(), status.to_owned(), name.to_owned()])
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl Display for LogRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("cwid not found")]
    NotFound,
    #[error("roster service responded with {0}")]
    Status(StatusCode),
    #[error("roster request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to decode roster response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RosterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::NotFound)
    }
}

/// External roster and attendance sheet integration.
#[async_trait]
pub trait Roster: Send + Sync + 'static {
    async fn list_courses(&self, cwid: &str) -> Result<CourseList, RosterError>;
    async fn sign_in(&self, cwid: &str, course: &str) -> Result<SignInReply, RosterError>;
    async fn append_row(&self, row: &LogRow) -> Result<(), RosterError>;
}
