use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevError {
    #[error("Email required")]
    EmailRequired,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Already signed up")]
    AlreadySignedUp,

    /// Any storage failure other than a uniqueness violation. Carries the
    /// backend's raw message, which is surfaced to the caller verbatim.
    #[error("{0}")]
    Storage(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LevError {
    /// True for errors caused by the submitted input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LevError::EmailRequired | LevError::InvalidEmail | LevError::AlreadySignedUp
        )
    }
}

pub type Result<T> = std::result::Result<T, LevError>;
