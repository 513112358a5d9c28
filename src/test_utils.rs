//! Shared test utilities for the attendance desk.
//!
//! Provides a scripted in-memory [`AttendanceService`] and helpers for building
//! sessions with sensible defaults.

#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use crate::{
    core::record::{AttendanceRecord, AuthenticatedTeacher},
    errors::{Error, Result},
    service::{AttendanceService, FetchResponse, LoginResponse, SaveResponse},
};
use chrono::NaiveDate;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

/// Initializes tracing once for tests, honouring `RUST_LOG`.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Builds a date, panicking on invalid input.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The teacher used throughout the tests: Asha, class 6A.
#[must_use]
pub fn sample_teacher() -> AuthenticatedTeacher {
    AuthenticatedTeacher {
        name: "Asha".to_string(),
        assigned_class: "6A".to_string(),
    }
}

/// A transport error as the HTTP service would report it.
#[must_use]
pub fn transport_error(endpoint: &str) -> Error {
    Error::Transport {
        endpoint: endpoint.to_string(),
        message: "connection refused".to_string(),
    }
}

/// A scripted reply from the fake service.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    /// Answer with this response
    Reply(T),
    /// Fail as if the network were down
    TransportFailure,
}

impl<T> Scripted<T> {
    fn into_result(self, endpoint: &str) -> Result<T> {
        match self {
            Self::Reply(value) => Ok(value),
            Self::TransportFailure => Err(transport_error(endpoint)),
        }
    }
}

/// In-memory attendance service.
///
/// # Defaults
/// * login: transport failure
/// * fetch: `found: false` for every date
/// * save: `success: true`
#[derive(Debug)]
pub struct FakeService {
    login: Mutex<Scripted<LoginResponse>>,
    records: Mutex<HashMap<NaiveDate, Scripted<FetchResponse>>>,
    save: Mutex<Scripted<SaveResponse>>,
    held: Mutex<HashMap<NaiveDate, Arc<Notify>>>,
    held_save: Mutex<Option<Arc<Notify>>>,
    parked: Notify,
    login_calls: AtomicUsize,
    fetches: Mutex<Vec<(String, NaiveDate)>>,
    saved: Mutex<Vec<AttendanceRecord>>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeService {
    /// Creates a fake with the defaults listed above.
    #[must_use]
    pub fn new() -> Self {
        Self {
            login: Mutex::new(Scripted::TransportFailure),
            records: Mutex::new(HashMap::new()),
            save: Mutex::new(Scripted::Reply(SaveResponse {
                success: true,
                error: None,
            })),
            held: Mutex::new(HashMap::new()),
            held_save: Mutex::new(None),
            parked: Notify::new(),
            login_calls: AtomicUsize::new(0),
            fetches: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Scripts the login reply.
    #[must_use]
    pub fn with_login(self, reply: Scripted<LoginResponse>) -> Self {
        *self.login.lock().unwrap() = reply;
        self
    }

    /// Scripts the fetch reply for one date.
    #[must_use]
    pub fn with_record(self, date: NaiveDate, reply: Scripted<FetchResponse>) -> Self {
        self.records.lock().unwrap().insert(date, reply);
        self
    }

    /// Scripts the save reply.
    #[must_use]
    pub fn with_save(self, reply: Scripted<SaveResponse>) -> Self {
        *self.save.lock().unwrap() = reply;
        self
    }

    /// Makes the next fetch for `date` wait until the returned gate is notified.
    pub fn hold_fetch(&self, date: NaiveDate) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.held.lock().unwrap().insert(date, Arc::clone(&gate));
        gate
    }

    /// Makes the next save wait until the returned gate is notified.
    pub fn hold_save(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.held_save.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Resolves once a held fetch or save has started waiting.
    pub async fn wait_for_held_request(&self) {
        self.parked.notified().await;
    }

    /// Number of login requests received.
    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    /// Class and date of every fetch received, in order.
    pub fn fetches(&self) -> Vec<(String, NaiveDate)> {
        self.fetches.lock().unwrap().clone()
    }

    /// Every record received by save, in order.
    pub fn saved(&self) -> Vec<AttendanceRecord> {
        self.saved.lock().unwrap().clone()
    }
}

impl AttendanceService for FakeService {
    async fn authenticate(&self, _username: &str, _password: &str) -> Result<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.login.lock().unwrap().clone();
        reply.into_result("login")
    }

    async fn fetch_record(&self, class_name: &str, date: NaiveDate) -> Result<FetchResponse> {
        self.fetches
            .lock()
            .unwrap()
            .push((class_name.to_string(), date));

        let gate = self.held.lock().unwrap().remove(&date);
        if let Some(gate) = gate {
            self.parked.notify_one();
            gate.notified().await;
        }

        let reply = self.records.lock().unwrap().get(&date).cloned();
        reply.map_or_else(
            || Ok(FetchResponse::not_found()),
            |reply| reply.into_result("fetchData"),
        )
    }

    async fn save_record(&self, record: &AttendanceRecord) -> Result<SaveResponse> {
        self.saved.lock().unwrap().push(record.clone());

        let gate = self.held_save.lock().unwrap().take();
        if let Some(gate) = gate {
            self.parked.notify_one();
            gate.notified().await;
        }

        let reply = self.save.lock().unwrap().clone();
        reply.into_result("saveData")
    }
}
