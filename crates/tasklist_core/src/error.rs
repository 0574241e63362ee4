use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("validation_error - {0}")]
    Validation(String),
    #[error("not_found - {0}")]
    NotFound(String),
    #[error("corrupt_state - {0}")]
    CorruptState(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("io_error - {0}")]
    Io(String),
    #[error("notification_error - {0}")]
    Notification(String),
}

impl AppError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn corrupt_state<M: Into<String>>(message: M) -> Self {
        Self::CorruptState(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn notification<M: Into<String>>(message: M) -> Self {
        Self::Notification(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::CorruptState(_) => "corrupt_state",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
            Self::Notification(_) => "notification_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::CorruptState(message)
            | Self::InvalidData(message)
            | Self::Io(message)
            | Self::Notification(message) => message,
        }
    }
}
