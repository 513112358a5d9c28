//! Remote attendance service interface.
//!
//! The service is a spreadsheet-backed web app offering three actions: login, fetch a
//! record by class and date, and save (upsert) a record. [`AttendanceService`] is the
//! seam the form workflow talks to; [`HttpAttendanceService`] is the production
//! implementation.

/// HTTP implementation backed by `reqwest`
pub mod http;

pub use http::HttpAttendanceService;

use crate::{
    core::record::{AttendanceData, AttendanceRecord, AuthenticatedTeacher},
    errors::Result,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::future::Future;

/// Response to a login request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Whether the credentials were accepted
    #[serde(default)]
    pub success: bool,
    /// Identity of the teacher on success
    #[serde(default)]
    pub teacher: Option<AuthenticatedTeacher>,
    /// Reason for a rejection
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a fetch request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FetchResponse {
    /// Whether a record exists for the class and date
    #[serde(default)]
    pub found: Option<bool>,
    /// The stored counts, already normalized
    #[serde(default)]
    pub data: Option<AttendanceData>,
}

impl FetchResponse {
    /// A response reporting an existing record.
    #[must_use]
    pub const fn found(data: AttendanceData) -> Self {
        Self {
            found: Some(true),
            data: Some(data),
        }
    }

    /// A response reporting that nothing is stored yet.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            found: Some(false),
            data: None,
        }
    }

    /// The stored record, if the service reported one. A missing `found` or `data`
    /// means nothing is stored.
    #[must_use]
    pub fn into_data(self) -> Option<AttendanceData> {
        match (self.found, self.data) {
            (Some(true), Some(data)) => Some(data),
            _ => None,
        }
    }
}

/// Response to a save request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveResponse {
    /// Whether the record was stored
    #[serde(default)]
    pub success: bool,
    /// Failure detail reported by the service
    #[serde(default)]
    pub error: Option<String>,
}

/// The remote attendance service.
///
/// Implementations report transport failures (including non-2xx responses) as
/// [`crate::errors::Error::Transport`] and otherwise return the decoded response
/// untouched; interpreting `success`/`found` is left to the caller.
pub trait AttendanceService {
    /// Checks a teacher's credentials.
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse>> + Send;

    /// Looks up the record stored for a class on a date.
    fn fetch_record(
        &self,
        class_name: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<FetchResponse>> + Send;

    /// Creates or replaces the record for its class and date.
    fn save_record(
        &self,
        record: &AttendanceRecord,
    ) -> impl Future<Output = Result<SaveResponse>> + Send;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_response_without_found_is_not_found() {
        let response: FetchResponse =
            serde_json::from_value(json!({ "data": { "classAttendance": {} } })).unwrap();
        assert!(response.into_data().is_none());
    }

    #[test]
    fn test_fetch_response_found_without_data_is_not_found() {
        let response: FetchResponse = serde_json::from_value(json!({ "found": true })).unwrap();
        assert!(response.into_data().is_none());
    }

    #[test]
    fn test_fetch_response_found_with_data() {
        let response: FetchResponse = serde_json::from_value(json!({
            "found": true,
            "data": { "classAttendance": { "girls": { "SC": 4 } } }
        }))
        .unwrap();
        let data = response.into_data().unwrap();
        assert_eq!(data.class_attendance.girls.sc.value_or_zero(), 4);
    }

    #[test]
    fn test_login_response_parses_teacher() {
        let response: LoginResponse = serde_json::from_value(json!({
            "success": true,
            "teacher": { "name": "Asha", "assignedClass": "6A" }
        }))
        .unwrap();
        assert!(response.success);
        assert_eq!(response.teacher.unwrap().assigned_class, "6A");
    }

    #[test]
    fn test_save_response_defaults_to_failure() {
        let response: SaveResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!response.success);
        assert!(response.error.is_none());
    }
}
