use thiserror::Error;

/// Failures reading or writing the persisted language preference.
///
/// These never reach the page: the resolver logs them and keeps the
/// selection in memory for the rest of the session.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preference storage is unavailable")]
    Unavailable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Unknown language code: '{0}'")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("invalid lead: {}", .0.join(", "))]
    Invalid(Vec<String>),

    #[error("lead endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lead endpoint returned {0}")]
    Status(reqwest::StatusCode),
}
