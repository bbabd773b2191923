use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("name is required")]
    MissingName,

    #[error("at least one of email or phone is required")]
    MissingContact,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("consent to be contacted is required")]
    ConsentRequired,

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("unknown age group: {0}")]
    UnknownAgeGroup(String),
}
