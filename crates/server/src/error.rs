use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use weddy_core::errors::InterfaceError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub correlation_id: String,
}

/// HTTP rendering of an [`InterfaceError`]. Client errors echo their message;
/// server-side failures only expose the user-safe text.
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl From<InterfaceError> for ApiError {
    fn from(error: InterfaceError) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::Forbidden { .. } => StatusCode::FORBIDDEN,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let error = match &self.0 {
            InterfaceError::BadRequest { message, .. }
            | InterfaceError::NotFound { message, .. }
            | InterfaceError::Forbidden { message, .. } => message.clone(),
            InterfaceError::ServiceUnavailable { .. } | InterfaceError::Internal { .. } => {
                self.0.user_message().to_string()
            }
        };
        ErrorBody { error, correlation_id: self.0.correlation_id().to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use weddy_core::errors::{ApplicationError, InterfaceError};

    use super::ApiError;

    #[test]
    fn database_failures_hide_driver_details() {
        let error = ApiError::from(
            ApplicationError::Database("pool timed out while waiting".to_string())
                .into_interface("req-9"),
        );

        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = error.body();
        assert_eq!(body.correlation_id, "req-9");
        assert!(!body.error.contains("pool"));
    }

    #[test]
    fn client_errors_keep_their_message() {
        let error = ApiError(InterfaceError::NotFound {
            message: "Image not found: tb_wedding_hall/a.png".to_string(),
            correlation_id: "req-1".to_string(),
        });

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.body().error, "Image not found: tb_wedding_hall/a.png");
    }
}
