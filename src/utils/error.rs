// utils/error.rs
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Erreurs de validation
    #[error("Validation error: {0}")]
    Validation(String),

    // Erreurs du circuit de validation
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Erreurs de ressources
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Erreurs d'infrastructure
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Code stable renvoyé au client dans le champ `kind`
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::SerializeError(_) => "SERIALIZE_ERROR",
            AppError::Internal => "INTERNAL",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match self {
            // 400 - Bad Request
            AppError::Validation(_) => HttpResponse::BadRequest().json(body),

            // 403 - Forbidden
            AppError::Unauthorized(_) => HttpResponse::Forbidden().json(body),

            // 404 - Not Found
            AppError::NotFound(_) => HttpResponse::NotFound().json(body),

            // 409 - Conflict
            AppError::InvalidTransition(_) | AppError::Conflict(_) => {
                HttpResponse::Conflict().json(body)
            }

            // 503 - Service Unavailable
            AppError::ServiceUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),

            // 500 - Internal Server Error
            _ => {
                tracing::error!("Internal server error: {}", self);
                HttpResponse::InternalServerError().json(json!({
                    "kind": "INTERNAL",
                    "message": "Internal server error",
                }))
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let error_messages: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect();

        AppError::Validation(messages.join("; "))
    }
}

// Type de résultat standard
pub type Result<T> = std::result::Result<T, AppError>;
