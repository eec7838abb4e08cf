use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpMessage, HttpResponse, ResponseError};
use serde_json::json;

use crate::model::FieldErrors;
use crate::services::ServiceError;

pub mod articles;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Article {0} not found")]
    NotFound(i64),
    #[error("Invalid article, {0}")]
    Validation(FieldErrors),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unsupported media type {0:?}")]
    UnsupportedMediaType(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound(id) => ApiError::NotFound(id),
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::SqlError(error) => ApiError::DatabaseError(error),
            ServiceError::MigrationError(error) => ApiError::Unexpected(error.into()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::DatabaseError(_) | ApiError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::NotFound(_) => response.json(json!({"detail": "Not found."})),
            ApiError::Validation(errors) => response.json(errors),
            ApiError::BadRequest(reason) => response.json(json!({ "detail": reason })),
            ApiError::UnsupportedMediaType(media_type) => response.json(json!({
                "detail": format!("Unsupported media type \"{media_type}\" in request.")
            })),
            ApiError::DatabaseError(_) | ApiError::Unexpected(_) => {
                tracing::error!("Request failed: {}", self);
                response.json(json!({"detail": "Internal server error."}))
            }
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|error, request| match error {
        JsonPayloadError::ContentType => {
            ApiError::UnsupportedMediaType(request.content_type().to_owned()).into()
        }
        error => ApiError::BadRequest(error.to_string()).into(),
    });
    let query_config = web::QueryConfig::default()
        .error_handler(|error, _| ApiError::BadRequest(error.to_string()).into());

    cfg.app_data(json_config)
        .app_data(query_config)
        .configure(articles::configure);
}
