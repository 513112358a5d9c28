//! Form session state - the single record being edited by one teacher.
//!
//! A [`FormSession`] owns the current record, the "existing entry" hint, the focused
//! field and the in-flight activity. Network calls are split into a `begin_*` step that
//! captures what the call needs and a `complete_*` step that applies the response, so
//! the caller can release the session while it awaits the service.
//!
//! Fetches are keyed by a [`SelectionKey`]. Every new date selection bumps the
//! generation, and a completion whose key no longer matches is discarded. This keeps
//! the last selection authoritative even if responses arrive out of order.

use crate::{
    core::{
        fields::{FIELD_ORDER, FieldId},
        input,
        record::{AttendanceData, AttendanceRecord, AuthenticatedTeacher, Count},
        totals::{self, FormTotals},
    },
    errors::{Error, Result},
    service::{FetchResponse, SaveResponse},
};
use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, info, warn};

/// Whether the selected class and date already have a stored record.
///
/// Mirrors the last successful fetch or submit; only used to label the submit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    /// Nothing stored yet for this class and date
    #[default]
    New,
    /// A record is stored; submitting replaces it
    Existing,
}

impl EntryMode {
    /// Label of the submit action.
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::New => "Submit New Entry",
            Self::Existing => "Update Entry",
        }
    }
}

/// Identifies one class/date selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKey {
    class_name: String,
    date: NaiveDate,
    generation: u64,
}

impl SelectionKey {
    /// Class the selection is for.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Date the selection is for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Network activity the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Activity {
    /// Nothing in flight
    #[default]
    Idle,
    /// Waiting on the fetch for this selection
    Fetching(SelectionKey),
    /// Waiting on a save
    Submitting,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "nothing"),
            Self::Fetching(_) => write!(f, "loading the record"),
            Self::Submitting => write!(f, "saving the record"),
        }
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Action succeeded
    Success,
    /// Action failed
    Error,
    /// Neutral information
    Info,
}

/// A transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notice {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// An informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// What a completed fetch did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// A stored record was loaded
    Loaded,
    /// Nothing stored; the form was reset for a new entry
    Fresh,
    /// The request failed; the form was reset for a new entry
    FetchFailed,
    /// A newer selection was made meanwhile; nothing changed
    Stale,
}

impl Reconciliation {
    /// Notification to show, if any.
    #[must_use]
    pub fn notice(self) -> Option<Notice> {
        match self {
            Self::Loaded => Some(Notice::success("Existing data loaded.")),
            Self::Fresh => Some(Notice::info("Ready for new entry.")),
            Self::FetchFailed => Some(Notice::error("Could not fetch data.")),
            Self::Stale => None,
        }
    }
}

/// What a completed submit did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was stored
    Saved,
    /// The service answered with `success: false`
    Rejected {
        /// Detail reported by the service
        detail: Option<String>,
    },
    /// The request did not complete
    Failed,
}

impl SubmitOutcome {
    /// Notification to show.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Saved => Notice::success("Data saved successfully!"),
            Self::Rejected { detail } => Notice::error(format!(
                "Error saving: {}",
                detail.as_deref().unwrap_or("Unknown error")
            )),
            Self::Failed => Notice::error("Error sending data. Check network connection."),
        }
    }
}

/// Result of editing a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOutcome {
    /// Field that was edited
    pub field: FieldId,
    /// Value now stored in it
    pub count: Count,
    /// Field focused afterwards
    pub focus: FieldId,
    /// Whether focus moved on to the next field
    pub advanced: bool,
}

/// Captured state of a fetch in flight.
#[derive(Debug, Clone)]
#[must_use = "a fetch ticket must be completed with `complete_fetch`"]
pub struct FetchTicket {
    key: SelectionKey,
}

impl FetchTicket {
    /// Class to fetch.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.key.class_name()
    }

    /// Date to fetch.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.key.date()
    }
}

/// Captured state of a submit in flight.
#[derive(Debug, Clone)]
#[must_use = "a submit ticket must be completed with `complete_submit`"]
pub struct SubmitTicket {
    key: SelectionKey,
    record: AttendanceRecord,
}

impl SubmitTicket {
    /// The complete record to send.
    #[must_use]
    pub const fn record(&self) -> &AttendanceRecord {
        &self.record
    }
}

/// One teacher's data-entry form.
#[derive(Debug, Clone)]
pub struct FormSession {
    teacher: AuthenticatedTeacher,
    date: NaiveDate,
    generation: u64,
    data: AttendanceData,
    entry: EntryMode,
    focus: usize,
    activity: Activity,
}

impl FormSession {
    /// Opens a blank form for the teacher's class on `date`.
    ///
    /// Nothing is fetched yet; call [`FormSession::begin_fetch`] to load the day.
    #[must_use]
    pub fn new(teacher: AuthenticatedTeacher, date: NaiveDate) -> Self {
        Self {
            teacher,
            date,
            generation: 0,
            data: AttendanceData::blank(),
            entry: EntryMode::New,
            focus: 0,
            activity: Activity::Idle,
        }
    }

    /// The authenticated teacher.
    #[must_use]
    pub const fn teacher(&self) -> &AuthenticatedTeacher {
        &self.teacher
    }

    /// The locked class, taken from the teacher's identity.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.teacher.assigned_class
    }

    /// The selected date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The counts being edited.
    #[must_use]
    pub const fn data(&self) -> &AttendanceData {
        &self.data
    }

    /// Existing-entry hint.
    #[must_use]
    pub const fn entry(&self) -> EntryMode {
        self.entry
    }

    /// Label of the submit action for the current entry mode.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        self.entry.submit_label()
    }

    /// Currently focused field.
    #[must_use]
    pub fn focus(&self) -> FieldId {
        FIELD_ORDER[self.focus.min(FIELD_ORDER.len() - 1)]
    }

    /// In-flight activity.
    #[must_use]
    pub const fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Whether a network call is in flight; fields are read-only while busy.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        !matches!(self.activity, Activity::Idle)
    }

    /// Totals of the current counts, recomputed on every call.
    #[must_use]
    pub fn totals(&self) -> FormTotals {
        totals::form_totals(&self.data)
    }

    /// Key of the current selection.
    #[must_use]
    pub fn selection_key(&self) -> SelectionKey {
        SelectionKey {
            class_name: self.teacher.assigned_class.clone(),
            date: self.date,
            generation: self.generation,
        }
    }

    /// The complete record as it would be submitted.
    #[must_use]
    pub fn record(&self) -> AttendanceRecord {
        AttendanceRecord {
            class_name: self.teacher.assigned_class.clone(),
            date: self.date,
            attendance_data: self.data,
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy {
                activity: self.activity.to_string(),
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.data = AttendanceData::blank();
        self.entry = EntryMode::New;
        self.focus = 0;
    }

    /// Selects a date and starts loading it.
    ///
    /// Supersedes any fetch still in flight. Refused while a submit is in flight.
    pub fn begin_fetch(&mut self, date: NaiveDate) -> Result<FetchTicket> {
        if matches!(self.activity, Activity::Submitting) {
            return Err(Error::Busy {
                activity: self.activity.to_string(),
            });
        }
        if let Activity::Fetching(pending) = &self.activity {
            debug!("Superseding pending fetch for {}", pending.date());
        }

        self.date = date;
        self.generation += 1;
        let key = self.selection_key();
        self.activity = Activity::Fetching(key.clone());
        Ok(FetchTicket { key })
    }

    /// Applies a fetch response, unless a newer selection has been made since.
    ///
    /// A failed fetch resets the form to blank: the client cannot tell whether a record
    /// exists, so it offers a new entry.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        response: Result<FetchResponse>,
    ) -> Reconciliation {
        if ticket.key != self.selection_key() {
            debug!(
                "Discarding stale fetch for {} (current selection {})",
                ticket.date(),
                self.date
            );
            return Reconciliation::Stale;
        }
        self.activity = Activity::Idle;

        match response.map(FetchResponse::into_data) {
            Ok(Some(data)) => {
                info!("Loaded existing record for {} on {}", ticket.class_name(), ticket.date());
                self.data = data;
                self.entry = EntryMode::Existing;
                self.focus = 0;
                Reconciliation::Loaded
            }
            Ok(None) => {
                info!("No record for {} on {}", ticket.class_name(), ticket.date());
                self.reset();
                Reconciliation::Fresh
            }
            Err(e) => {
                warn!("Fetch for {} failed: {}", ticket.date(), e);
                self.reset();
                Reconciliation::FetchFailed
            }
        }
    }

    /// Replaces the text of a field, sanitizing it and advancing focus once the value
    /// has two digits.
    pub fn input(&mut self, field: FieldId, raw: &str) -> Result<InputOutcome> {
        self.ensure_idle()?;
        let sanitized = input::sanitize(raw)?;

        self.data
            .block_mut(field.kind)
            .gender_mut(field.gender)
            .set(field.category, sanitized.count);

        let next = if sanitized.advance { field.next() } else { None };
        let focus = next.unwrap_or(field);
        self.focus = focus.position();

        Ok(InputOutcome {
            field,
            count: sanitized.count,
            focus,
            advanced: next.is_some(),
        })
    }

    /// Types one character into the focused field.
    ///
    /// A field already showing two digits is full, so the keystroke starts a new value
    /// instead of extending it.
    pub fn type_digit(&mut self, key: char) -> Result<InputOutcome> {
        let field = self.focus();
        let mut text = self.count(field).to_string();
        if text.len() >= 2 {
            text.clear();
        }
        text.push(key);
        self.input(field, &text)
    }

    /// Types a run of digits into the form, one keystroke at a time.
    ///
    /// Every key is checked first, so a rejected run leaves the form untouched.
    pub fn type_keys(&mut self, keys: &str) -> Result<Option<InputOutcome>> {
        self.ensure_idle()?;
        let keys = keys.trim();
        if !keys.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidInput {
                input: keys.to_string(),
            });
        }

        let mut last = None;
        for key in keys.chars() {
            last = Some(self.type_digit(key)?);
        }
        Ok(last)
    }

    /// Value of a field.
    #[must_use]
    pub fn count(&self, field: FieldId) -> Count {
        self.data
            .block(field.kind)
            .gender(field.gender)
            .get(field.category)
    }

    /// Moves focus to a field.
    pub const fn focus_field(&mut self, field: FieldId) {
        self.focus = field.position();
    }

    /// Resets the form to blank without contacting the service.
    pub fn clear(&mut self) -> Result<Notice> {
        self.ensure_idle()?;
        self.reset();
        Ok(Notice::success("Fields cleared."))
    }

    /// Starts a submit of the complete current record.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket> {
        self.ensure_idle()?;
        self.activity = Activity::Submitting;
        Ok(SubmitTicket {
            key: self.selection_key(),
            record: self.record(),
        })
    }

    /// Returns to idle after a submit whose response will never be applied.
    pub fn abandon_submit(&mut self) {
        if matches!(self.activity, Activity::Submitting) {
            warn!("Submit for {} abandoned before completion", self.date);
            self.activity = Activity::Idle;
        }
    }

    /// Applies a save response. The record itself is never changed here.
    pub fn complete_submit(
        &mut self,
        ticket: &SubmitTicket,
        response: Result<SaveResponse>,
    ) -> SubmitOutcome {
        if matches!(self.activity, Activity::Submitting) {
            self.activity = Activity::Idle;
        }

        match response {
            Ok(SaveResponse { success: true, .. }) => {
                info!("Saved record for {} on {}", ticket.record.class_name, ticket.record.date);
                if ticket.key == self.selection_key() {
                    self.entry = EntryMode::Existing;
                }
                SubmitOutcome::Saved
            }
            Ok(SaveResponse { error, .. }) => {
                warn!("Service rejected record: {:?}", error);
                SubmitOutcome::Rejected {
                    detail: error.filter(|e| !e.trim().is_empty()),
                }
            }
            Err(e) => {
                warn!("Submit failed: {}", e);
                SubmitOutcome::Failed
            }
        }
    }
}
