use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DuplicateUser,
    InvalidCredentials,
    Database(String),
    OAuth(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateUser => write!(f, "Username is already registered"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::OAuth(msg) => write!(f, "OAuth error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
