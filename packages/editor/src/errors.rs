//! Error types for the page builder
//!
//! Two layers:
//! - [`PageBuilderError`]: what async store operations return to the caller
//! - [`ErrorRecord`]: the structured record that gets logged, carrying a
//!   user-facing message, a kind and a `recoverable` flag the UI uses to
//!   decide which recovery actions to offer

use crate::persist::PersistError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use vinyl_model::{Clock, IdGenerator, ValidationIssue};

#[derive(Error, Debug)]
pub enum PageBuilderError {
    #[error("Persistence failed: {0}")]
    Persist(#[from] PersistError),

    #[error("A {0} is already in progress")]
    Busy(PendingOperation),
}

/// Async operation that holds the in-flight flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOperation {
    Save,
    Publish,
}

impl fmt::Display for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingOperation::Save => write!(f, "save"),
            PendingOperation::Publish => write!(f, "publish"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A section failed to render or process
    Section,
    /// The whole page failed to load
    Page,
    /// The persistence callback rejected
    Save,
    /// The document failed a structural check
    Validation,
    Network,
    Unknown,
}

impl ErrorKind {
    fn default_recoverable(&self) -> bool {
        !matches!(self, ErrorKind::Page)
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            ErrorKind::Section => "This section could not be displayed.",
            ErrorKind::Page => "The page could not be loaded.",
            ErrorKind::Save => "Your changes could not be saved. Please try again.",
            ErrorKind::Validation => "The page contains invalid content.",
            ErrorKind::Network => NETWORK_MESSAGE,
            ErrorKind::Unknown => "An unexpected error occurred.",
        }
    }
}

const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Structured error record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub id: String,
    pub kind: ErrorKind,

    /// Human-readable message for display
    pub message: String,

    /// Technical detail (the underlying error text)
    pub details: Option<String>,

    pub recoverable: bool,
    pub timestamp: DateTime<Utc>,

    pub component: Option<String>,
    pub section_id: Option<String>,
}

impl ErrorRecord {
    /// Build a record from raw error text, deriving the display message
    pub fn new(kind: ErrorKind, raw: impl Into<String>, ids: &IdGenerator, clock: &dyn Clock) -> Self {
        let raw = raw.into();
        Self {
            id: ids.next_id(clock),
            kind,
            message: user_message(kind, &raw),
            details: Some(raw),
            recoverable: kind.default_recoverable(),
            timestamp: clock.now(),
            component: None,
            section_id: None,
        }
    }

    pub fn from_persist_error(err: &PersistError, ids: &IdGenerator, clock: &dyn Clock) -> Self {
        let kind = match err {
            PersistError::Network(_) => ErrorKind::Network,
            _ => ErrorKind::Save,
        };
        Self::new(kind, err.to_string(), ids, clock).with_recoverable(true)
    }

    pub fn from_validation_issue(issue: &ValidationIssue, ids: &IdGenerator, clock: &dyn Clock) -> Self {
        let mut record = Self::new(ErrorKind::Validation, issue.message.clone(), ids, clock);
        record.message = format!("{} ({})", ErrorKind::Validation.fallback_message(), issue.rule);
        record.section_id = issue.section_id.clone();
        record
    }

    pub fn in_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn for_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn with_recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = recoverable;
        self
    }
}

/// Map raw error text onto something a store admin can act on
pub fn user_message(kind: ErrorKind, raw: &str) -> String {
    let lower = raw.to_lowercase();

    let message = if raw.contains("Cannot read property") || raw.contains("Cannot read properties") {
        "Data structure is invalid. Please refresh the page and try again."
    } else if lower.contains("failed to fetch") || lower.contains("network") || lower.contains("connection refused") {
        NETWORK_MESSAGE
    } else if lower.contains("timed out") || lower.contains("timeout") {
        "The request timed out. Please try again."
    } else if lower.contains("json") || lower.contains("unexpected token") {
        "The page data could not be read. It may be corrupted."
    } else if lower.contains("permission denied") || lower.contains("unauthorized") {
        "You do not have permission to perform this action."
    } else {
        kind.fallback_message()
    };

    message.to_string()
}
