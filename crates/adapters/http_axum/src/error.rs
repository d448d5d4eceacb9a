//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use planthub_domain::error::PlantHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

/// Maps [`PlantHubError`] to an HTTP response with appropriate status code.
pub struct ApiError(PlantHubError);

impl From<PlantHubError> for ApiError {
    fn from(err: PlantHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PlantHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PlantHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PlantHubError::Actuator(err) => {
                tracing::warn!(error = %err, "actuator error");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            PlantHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                ok: false,
                error: message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planthub_domain::actuator::ActuatorKind;
    use planthub_domain::error::{ActuatorError, ValidationError};

    #[test]
    fn should_map_errors_to_status_codes() {
        let cases = [
            (
                ApiError::from(PlantHubError::from(ValidationError::InvalidDate(
                    "x".to_string(),
                ))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(PlantHubError::from(ActuatorError::new(
                    ActuatorKind::Pump,
                    "stuck",
                ))),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(PlantHubError::Storage("gone".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
