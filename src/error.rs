use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("Unknown workout type: {0}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    #[error("Invalid coordinates: ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },
    #[error("No map location selected")]
    NoLocationSelected,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Persisted data is corrupt: {0}")]
    Corrupt(serde_json::Error),
    #[error("Failed to encode workouts: {0}")]
    Encode(serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Workout {0} already exists")]
    DuplicateId(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Geolocation unavailable: {0}")]
pub struct GeolocationUnavailable(pub String);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Workout(#[from] WorkoutError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Workout(WorkoutError::InvalidInput(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Workout(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::DuplicateId(_)) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Persistence(_)) | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
