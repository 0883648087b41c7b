/// Represent errors in the application
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    Database(String),
    Io(String),
    Csv(String),
    Json(String),
    Config(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Database(cause) => write!(f, "Database error: {cause}"),
            ServiceError::Io(cause) => write!(f, "IO error: {cause}"),
            ServiceError::Csv(cause) => write!(f, "CSV error: {cause}"),
            ServiceError::Json(cause) => write!(f, "Serialization error: {cause}"),
            ServiceError::Config(cause) => write!(f, "Configuration error: {cause}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Helper for `ServiceError` result
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        ServiceError::Database(format!("{}", error))
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> Self {
        ServiceError::Io(format!("{}", error))
    }
}

impl From<csv::Error> for ServiceError {
    fn from(error: csv::Error) -> Self {
        ServiceError::Csv(format!("{}", error))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::Json(format!("{}", error))
    }
}
