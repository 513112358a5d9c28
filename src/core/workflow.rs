//! Async orchestration of login, date selection and submission.
//!
//! These functions are framework-agnostic: a front-end passes in the service and the
//! shared session and shows the returned notices. The session lock is only held to
//! begin and to complete an action, never while awaiting the service.

use crate::{
    core::{
        record::AuthenticatedTeacher,
        session::{FormSession, Reconciliation, SubmitOutcome},
    },
    errors::{Error, Result},
    service::AttendanceService,
};
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Shown when the login request could not complete.
pub const LOGIN_TRANSPORT_MESSAGE: &str = "Login failed. Check connection or URL.";

/// Shown when the service rejects credentials without saying why.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

/// Authenticates a teacher.
///
/// Blank credentials are refused locally without contacting the service.
#[instrument(skip(service, password))]
pub async fn login<S>(service: &S, username: &str, password: &str) -> Result<AuthenticatedTeacher>
where
    S: AttendanceService + Sync,
{
    if username.trim().is_empty() || password.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let response = match service.authenticate(username.trim(), password).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Login request failed: {}", e);
            return Err(Error::AuthenticationFailed {
                message: LOGIN_TRANSPORT_MESSAGE.to_string(),
            });
        }
    };

    match response {
        crate::service::LoginResponse {
            success: true,
            teacher: Some(teacher),
            ..
        } => {
            info!("{} logged in for class {}", teacher.name, teacher.assigned_class);
            Ok(teacher)
        }
        crate::service::LoginResponse { message, .. } => {
            let message = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string());
            info!("Login rejected: {}", message);
            Err(Error::AuthenticationFailed { message })
        }
    }
}

/// Selects a date and reconciles the form with what the service has stored for it.
///
/// Returns [`Reconciliation::Stale`] if another selection was made while waiting.
#[instrument(skip(service, session))]
pub async fn select_date<S>(
    service: &S,
    session: &Mutex<FormSession>,
    date: NaiveDate,
) -> Result<Reconciliation>
where
    S: AttendanceService + Sync,
{
    let ticket = session.lock().await.begin_fetch(date)?;
    let response = service
        .fetch_record(ticket.class_name(), ticket.date())
        .await;
    Ok(session.lock().await.complete_fetch(&ticket, response))
}

/// Submits the complete current record.
#[instrument(skip(service, session))]
pub async fn submit<S>(service: &S, session: &Mutex<FormSession>) -> Result<SubmitOutcome>
where
    S: AttendanceService + Sync,
{
    let ticket = session.lock().await.begin_submit()?;
    let pending = PendingSubmit { session };
    let response = service.save_record(ticket.record()).await;
    let outcome = session.lock().await.complete_submit(&ticket, response);
    std::mem::forget(pending);
    Ok(outcome)
}

/// Releases the session if a submit is dropped while waiting on the service.
struct PendingSubmit<'a> {
    session: &'a Mutex<FormSession>,
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        match self.session.try_lock() {
            Ok(mut session) => session.abandon_submit(),
            Err(_) => warn!("Session locked; abandoned submit left in progress"),
        }
    }
}
