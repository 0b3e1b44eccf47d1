use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GinumError {
    #[error("Config directory not found at {0}. Run 'ginum init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {path}: {message}")]
    ConfigWrite { path: PathBuf, message: String },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Not logged in. Run 'ginum login' first.")]
    NotLoggedIn,

    #[error("Company ID not found. Please log in again.")]
    NoCompany,

    #[error("Session expired or unauthorized. Run 'ginum login' to sign in again.")]
    Unauthorized,

    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    #[error("Unknown user role '{0}'. Please contact support.")]
    UnknownRole(String),

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(String),

    /// Business error reported by the backend; the message is shown verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    #[error("Draft '{0}' not found. Use 'ginum draft list' to see drafts.")]
    DraftNotFound(String),

    #[error("Draft '{0}' already exists")]
    DraftExists(String),

    #[error("Invalid draft name '{0}'. Use letters, digits, '-' or '_'.")]
    InvalidDraftName(String),

    #[error("Row {row} does not exist (draft has {count} row(s))")]
    RowOutOfRange { row: usize, count: usize },

    #[error("Row {0} is the blank trailing row and cannot be removed")]
    TrailingRow(usize),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{field}' does not apply to {kind} drafts")]
    FieldNotApplicable { field: String, kind: String },

    #[error("Invalid assignment '{0}'. Expected 'field=value'.")]
    InvalidAssignment(String),

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Debit and credit totals must be equal (out of balance by {difference})")]
    OutOfBalance {
        debit: Decimal,
        credit: Decimal,
        difference: Decimal,
    },

    #[error("A journal entry needs at least two lines with an account and a positive amount")]
    TooFewJournalLines,

    #[error("Please add at least one valid line item")]
    NoValidRows,

    #[error("Incomplete rows would be left out: the request totals {sent} but the draft shows {shown}. Complete or remove them first.")]
    IncompleteRows { shown: Decimal, sent: Decimal },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GinumError>;
