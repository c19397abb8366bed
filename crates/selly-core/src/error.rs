use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("no profile yet: run 'selly onboard <name>'")]
    NotOnboarded,

    #[error("invalid name '{0}': must not be blank")]
    InvalidName(String),

    #[error("a reply is still being written for the previous letter")]
    ReplyInFlight,

    #[error("reply generation needs a Tokio runtime")]
    NoRuntime,

    #[error("reply not found: {0}")]
    ReplyNotFound(String),

    #[error("reply {0} has already been planted")]
    AlreadyPlanted(String),

    #[error("unknown emotion: {0}")]
    UnknownEmotion(String),

    #[error("unknown context: {0}")]
    UnknownContext(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("invalid time unit: {0}")]
    InvalidTimeUnit(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GardenError>;
