use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Field name used for errors that span several fields.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Per-field error messages, keyed by wire field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Duplicate key on {field}: {message}")]
    DuplicateKey { field: &'static str, message: String },

    #[error("Invalid reference in {field}: {message}")]
    ReferentialIntegrity { field: &'static str, message: String },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl AppError {
    /// Validation error for a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }

    fn single(field: &str, message: &str) -> Option<FieldErrors> {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.to_string()]);
        Some(fields)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::ReferentialIntegrity { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(fields) => ErrorResponse {
                error: "Validation failed".to_string(),
                fields: Some(fields.clone()),
            },
            AppError::DuplicateKey { field, message } => ErrorResponse {
                error: "Duplicate key".to_string(),
                fields: Self::single(field, message),
            },
            AppError::ReferentialIntegrity { field, message } => ErrorResponse {
                error: "Invalid reference".to_string(),
                fields: Self::single(field, message),
            },
            AppError::NotFound(msg) | AppError::BadRequest(msg) => ErrorResponse {
                error: msg.clone(),
                fields: None,
            },
            AppError::Persistence(msg) => {
                error!("Persistence error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    fields: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AppError::Validation(fields)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateKey {
                field: NON_FIELD_ERRORS,
                message: "A record with these values already exists.".to_string(),
            },
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::ReferentialIntegrity {
                    field: NON_FIELD_ERRORS,
                    message: "Referenced record does not exist.".to_string(),
                }
            }
            sqlx::Error::Database(db) if db.is_check_violation() => {
                AppError::field(NON_FIELD_ERRORS, "Ensure values are non-negative.")
            }
            _ => AppError::Persistence(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

// Extractor error handlers so malformed requests use the same error body.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound(err.to_string()).into()
}
