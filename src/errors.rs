use crate::key::InvalidKey;
use crate::store::StoreError;
use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] InvalidKey),
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] InvalidKey),
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
    #[error("no record for {0}")]
    NotFound(String),
}

const INVALID_KEY_MESSAGE: &str = "Please enter a valid email address, like you@example.com.";
const UNAVAILABLE_MESSAGE: &str = "Saved analytics are unreachable right now. Please try again.";

impl SaveError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidKey(_) => INVALID_KEY_MESSAGE.to_string(),
            Self::StoreUnavailable(_) => UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

impl LoadError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidKey(_) => INVALID_KEY_MESSAGE.to_string(),
            Self::StoreUnavailable(_) => UNAVAILABLE_MESSAGE.to_string(),
            Self::NotFound(key) => format!("Nothing has been saved for {key} yet."),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl From<SaveError> for AppError {
    fn from(err: SaveError) -> Self {
        let message = err.user_message();
        match err {
            SaveError::InvalidKey(_) => Self::bad_request(message),
            SaveError::StoreUnavailable(_) => Self::unavailable(message),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let message = err.user_message();
        match err {
            LoadError::InvalidKey(_) => Self::bad_request(message),
            LoadError::StoreUnavailable(_) => Self::unavailable(message),
            LoadError::NotFound(_) => Self::not_found(message),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_down() -> StoreError {
        StoreError::Status {
            status: 502,
            body: "bad gateway".into(),
        }
    }

    #[test]
    fn save_errors_map_to_statuses() {
        let invalid = AppError::from(SaveError::InvalidKey(InvalidKey::Empty));
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, INVALID_KEY_MESSAGE);

        let down = AppError::from(SaveError::StoreUnavailable(backend_down()));
        assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(down.message.contains("unreachable"));
    }

    #[test]
    fn load_errors_map_to_statuses() {
        let invalid = AppError::from(LoadError::InvalidKey(InvalidKey::Shape("nope".into())));
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, INVALID_KEY_MESSAGE);

        let down = AppError::from(LoadError::StoreUnavailable(backend_down()));
        assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(down.message, UNAVAILABLE_MESSAGE);

        let missing = AppError::from(LoadError::NotFound("a@b.com".into()));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.message, "Nothing has been saved for a@b.com yet.");
    }

    #[test]
    fn messages_are_distinct_per_kind() {
        let messages = [
            LoadError::InvalidKey(InvalidKey::Empty).user_message(),
            LoadError::StoreUnavailable(backend_down()).user_message(),
            LoadError::NotFound("a@b.com".into()).user_message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
