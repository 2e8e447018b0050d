use crate::error::{ErrorResponse, ValidationError};
use crate::providers::{Outcome, Rejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

pub const RATE_LIMIT_MESSAGE: &str = "Limite de solicitações excedido. Tente novamente mais tarde.";
pub const NOT_FOUND_MESSAGE: &str = "CEP não encontrado.";
pub const INVALID_DATA_MESSAGE: &str = "Dados de resposta inválidos.";
pub const PROCESSING_ERROR_PREFIX: &str = "Erro ao processar a requisição";

/// Status code and JSON body produced for one lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl GatewayResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// The only place an [`Outcome`] becomes a status code and body.
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success(address) => match serde_json::to_value(&address) {
                Ok(body) => Self::new(StatusCode::OK, body),
                Err(e) => Self::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(format!("{PROCESSING_ERROR_PREFIX}: {e}")),
                ),
            },
            Outcome::Rejected(Rejection::InvalidPostalCode) => Self::error(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ValidationError::InvalidPostalCode.to_string()),
            ),
            Outcome::Rejected(Rejection::UnsupportedProvider) => Self::error(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ValidationError::UnsupportedProvider.to_string()),
            ),
            Outcome::Rejected(Rejection::RateLimitExceeded) => Self::error(
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(RATE_LIMIT_MESSAGE),
            ),
            Outcome::NotFound => {
                Self::error(StatusCode::NOT_FOUND, ErrorResponse::new(NOT_FOUND_MESSAGE))
            }
            Outcome::UpstreamDataInvalid(payload) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_data(INVALID_DATA_MESSAGE, payload),
            ),
            Outcome::TransportFailure(message) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(format!("{PROCESSING_ERROR_PREFIX}: {message}")),
            ),
        }
    }

    pub fn error(status: StatusCode, error: ErrorResponse) -> Self {
        let body = serde_json::to_value(&error)
            .unwrap_or_else(|_| serde_json::json!({ "error": error.error }));
        Self::new(status, body)
    }

    /// Message carried in the `error` field, if this is a failure body.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<ValidationError> for Rejection {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidPostalCode => Rejection::InvalidPostalCode,
            ValidationError::UnsupportedProvider => Rejection::UnsupportedProvider,
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejections_map_to_client_errors() {
        let invalid = GatewayResponse::from_outcome(Outcome::Rejected(Rejection::InvalidPostalCode));
        let unsupported =
            GatewayResponse::from_outcome(Outcome::Rejected(Rejection::UnsupportedProvider));
        let limited = GatewayResponse::from_outcome(Outcome::Rejected(Rejection::RateLimitExceeded));

        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(unsupported.status, StatusCode::BAD_REQUEST);
        assert_ne!(invalid.error_message(), unsupported.error_message());
        assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(limited.error_message(), Some(RATE_LIMIT_MESSAGE));
    }

    #[test]
    fn test_not_found() {
        let response = GatewayResponse::from_outcome(Outcome::NotFound);
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "error": NOT_FOUND_MESSAGE }));
    }

    #[test]
    fn test_invalid_data_attaches_payload() {
        let payload = json!({ "localidade": "São Paulo" });
        let response = GatewayResponse::from_outcome(Outcome::UpstreamDataInvalid(payload.clone()));

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body,
            json!({ "error": INVALID_DATA_MESSAGE, "data": payload })
        );
    }

    #[test]
    fn test_transport_failure_includes_detail() {
        let response =
            GatewayResponse::from_outcome(Outcome::TransportFailure("connection reset".into()));

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.error_message(),
            Some("Erro ao processar a requisição: connection reset")
        );
        assert!(response.body.get("data").is_none());
    }
}
