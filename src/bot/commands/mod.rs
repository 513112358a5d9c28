//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Form editing, date selection and submission commands
pub mod attendance;

/// Teacher login
pub mod auth;

/// General utility commands
pub mod general;

/// Reply formatting shared by the form commands
pub mod reply;

// Export commands
pub use attendance::*;
pub use auth::*;
pub use general::*;
