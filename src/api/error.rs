use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

use super::models::ErrorResponse;
use crate::dispatch::DispatchError;
use crate::filters::TransformError;
use crate::storage::StorageError;
use crate::templates::RenderError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("payload invalid: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Dispatch(DispatchError::NoHandler(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Dispatch(DispatchError::Accessor(_)) => StatusCode::BAD_REQUEST,
            ApiError::Dispatch(DispatchError::Transform(err)) => match err {
                TransformError::SourceUnavailable {
                    source: StorageError::NotFound(_),
                    ..
                } => StatusCode::NOT_FOUND,
                TransformError::SourceUnavailable { .. } => StatusCode::BAD_GATEWAY,
                TransformError::SourceTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                TransformError::InvalidOption { .. } | TransformError::UnsupportedFormat(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                TransformError::CacheLookup { .. } | TransformError::CacheWrite { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::Dispatch(DispatchError::NoHandler(_)) => "NO_HANDLER",
            ApiError::Dispatch(DispatchError::Accessor(_)) => "UNKNOWN_FIELD",
            ApiError::Dispatch(DispatchError::Transform(_)) => "TRANSFORM_FAILED",
            ApiError::Render(_) => "RENDER_FAILED",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(json!(body))).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::InvalidPayload(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerError;
    use crate::media::AccessorError;

    #[test]
    fn test_status_codes() {
        let no_handler = ApiError::from(DispatchError::from(HandlerError::NoHandlerFound {
            kind: "video".to_string(),
            id: "1".to_string(),
        }));
        assert_eq!(no_handler.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(no_handler.code(), "NO_HANDLER");

        let unknown_field = ApiError::from(DispatchError::from(AccessorError::NotFound {
            property: "updated_at".to_string(),
            accessor: "getUpdatedAt".to_string(),
        }));
        assert_eq!(unknown_field.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown_field.code(), "UNKNOWN_FIELD");

        let too_large = ApiError::from(DispatchError::from(TransformError::SourceTooLarge {
            key: "a.jpg".to_string(),
            size: 10,
            limit: 4,
        }));
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(too_large.code(), "TRANSFORM_FAILED");

        let render = ApiError::from(RenderError::new("t.html", "boom"));
        assert_eq!(render.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(render.code(), "RENDER_FAILED");
    }
}
