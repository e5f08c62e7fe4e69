use std::io;

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Validation(String),
    Config(String),
    Effect(String),
}

impl AppError {
    /// Shorthand for failures raised inside redo/undo effects.
    pub fn effect(msg: impl Into<String>) -> Self {
        AppError::Effect(msg.into())
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(format!("TOML: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "IO Error: {}", err),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
            AppError::Effect(msg) => write!(f, "Effect Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
