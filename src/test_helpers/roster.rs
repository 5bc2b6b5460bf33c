use crate::roster::{CourseList, LogRow, Roster, RosterError, SignInReply};
use async_trait::async_trait;
use http::StatusCode;
use std::sync::Mutex;

#[derive(Clone, Debug)]
pub enum SignInScript {
    Reply(SignInReply),
    NotFound,
    Unavailable,
}

/// Scripted roster that records every call it receives.
pub struct TestRoster {
    courses: Option<CourseList>,
    sign_in: SignInScript,
    append_fails: bool,
    sign_in_calls: Mutex<Vec<(String, String)>>,
    rows: Mutex<Vec<LogRow>>,
}

impl TestRoster {
    pub fn new() -> Self {
        Self {
            courses: None,
            sign_in: SignInScript::NotFound,
            append_fails: false,
            sign_in_calls: Mutex::new(Vec::new()),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn with_courses(mut self, courses: serde_json::Value) -> Self {
        self.courses = Some(courses.into());
        self
    }

    pub fn scripted_sign_in(mut self, script: SignInScript) -> Self {
        self.sign_in = script;
        self
    }

    pub fn signs_in(self, student_name: &str) -> Self {
        self.scripted_sign_in(SignInScript::Reply(SignInReply::signed_in(student_name)))
    }

    pub fn failing_appends(mut self) -> Self {
        self.append_fails = true;
        self
    }

    pub fn sign_in_calls(&self) -> Vec<(String, String)> {
        self.sign_in_calls.lock().expect("Poisoned lock").clone()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .lock()
            .expect("Poisoned lock")
            .iter()
            .map(|row| row.values().to_vec())
            .collect()
    }
}

#[async_trait]
impl Roster for TestRoster {
    async fn list_courses(&self, _cwid: &str) -> Result<CourseList, RosterError> {
        self.courses.clone().ok_or(RosterError::NotFound)
    }

    async fn sign_in(&self, cwid: &str, course: &str) -> Result<SignInReply, RosterError> {
        self.sign_in_calls
            .lock()
            .expect("Poisoned lock")
            .push((cwid.to_owned(), course.to_owned()));

        match &self.sign_in {
            SignInScript::Reply(reply) => Ok(reply.clone()),
            SignInScript::NotFound => Err(RosterError::NotFound),
            SignInScript::Unavailable => Err(RosterError::Status(StatusCode::SERVICE_UNAVAILABLE)),
        }
    }

    async fn append_row(&self, row: &LogRow) -> Result<(), RosterError> {
        self.rows.lock().expect("Poisoned lock").push(row.clone());

        if self.append_fails {
            return Err(RosterError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }

        Ok(())
    }
}
