use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kennel_core::errors::KennelError;

/// Handler error: any `anyhow::Error`, rendered as a `KennelError` body.
#[derive(Debug)]
pub struct KennelAxumError(pub anyhow::Error);

impl From<anyhow::Error> for KennelAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<KennelError> for KennelAxumError {
    fn from(e: KennelError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for KennelAxumError {
    fn into_response(self) -> Response {
        // Keep the structured fields even when wrapped in anyhow contexts.
        let err = match KennelError::from_anyhow(&self.0) {
            Some(err) => err.clone(),
            None => {
                tracing::error!(error = ?self.0, "unhandled service error");
                KennelError::general_error(self.0.to_string())
            }
        };

        let status = StatusCode::from_u16(err.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(err.to_json())).into_response()
    }
}
