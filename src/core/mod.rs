//! Core form logic - framework-agnostic record model, totals, input handling and the
//! fetch/submit workflow. The bot layer only formats what this module decides.

/// Field identifiers and traversal order
pub mod fields;
/// Keystroke sanitization
pub mod input;
/// Attendance record model and wire normalization
pub mod record;
/// Text rendering of the form
pub mod render;
/// Per-teacher form session state
pub mod session;
/// Derived totals
pub mod totals;
/// Async login, fetch and submit orchestration
pub mod workflow;
