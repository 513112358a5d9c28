//! HTTP client for the spreadsheet web app.
//!
//! Every action goes to the same script URL. Reads are `GET` requests selecting the
//! action with an `action` query parameter; saves are `POST`ed as multipart form data
//! carrying `action=saveData` and the JSON record in a `payload` part.

use crate::{
    config::service::ServiceConfig,
    core::record::AttendanceRecord,
    errors::{Error, Result},
    service::{AttendanceService, FetchResponse, LoginResponse, SaveResponse},
};
use chrono::NaiveDate;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const LOGIN_ACTION: &str = "login";
const FETCH_ACTION: &str = "fetchData";
const SAVE_ACTION: &str = "saveData";

/// Attendance service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAttendanceService {
    http: reqwest::Client,
    script_url: Url,
}

impl HttpAttendanceService {
    /// Builds a client for the configured script URL.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            script_url: config.script_url.clone(),
        })
    }

    /// The script URL every action is sent to.
    #[must_use]
    pub const fn script_url(&self) -> &Url {
        &self.script_url
    }

    fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.script_url.clone();
        url.query_pairs_mut()
            .append_pair("action", action)
            .extend_pairs(params.iter().copied());
        url
    }

    async fn get_action<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.http.get(self.action_url(action, params));
        self.send(action, request).await
    }

    /// Sends a request, treating transport failures and non-2xx statuses alike.
    async fn send<T: DeserializeOwned>(
        &self,
        action: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let transport = |message: String| Error::Transport {
            endpoint: action.to_string(),
            message,
        };

        let response = request.send().await.map_err(|e| {
            warn!("{} request failed: {}", action, e);
            transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned HTTP {}: {}", action, status, body);
            return Err(transport(format!("HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| transport(format!("invalid response body: {e}")))
    }
}

impl AttendanceService for HttpAttendanceService {
    #[instrument(skip(self, password))]
    async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse> {
        debug!("Sending login request");
        self.get_action(
            LOGIN_ACTION,
            &[("username", username), ("password", password)],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_record(&self, class_name: &str, date: NaiveDate) -> Result<FetchResponse> {
        let date = date.format("%Y-%m-%d").to_string();
        debug!("Fetching attendance record");
        self.get_action(FETCH_ACTION, &[("class", class_name), ("date", &date)])
            .await
    }

    #[instrument(skip(self, record), fields(class = %record.class_name, date = %record.date))]
    async fn save_record(&self, record: &AttendanceRecord) -> Result<SaveResponse> {
        let payload = serde_json::to_string(record)?;
        let form = Form::new()
            .text("action", SAVE_ACTION)
            .text("payload", payload);
        debug!("Posting attendance record");
        let request = self.http.post(self.script_url.clone()).multipart(form);
        self.send(SAVE_ACTION, request).await
    }
}
