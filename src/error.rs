use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Client input faults detected before any other work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, forneça um CEP válido.")]
    InvalidPostalCode,
    #[error("Por favor, especifique um serviço de consulta de CEP válido: \"viacep\" ou \"cepaberto\".")]
    UnsupportedProvider,
}

/// Failures at the transport boundary. The display text is surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Resposta não está em formato JSON")]
    NonJsonResponse,
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Errors raised while starting or running the service itself.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for GatewayError {
    fn from(err: validator::ValidationErrors) -> Self {
        GatewayError::Configuration(err.to_string())
    }
}

/// JSON body returned for every failed lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            data: None,
        }
    }

    pub fn with_data(error: impl Into<String>, data: Value) -> Self {
        Self {
            error: error.into(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_messages_are_distinct() {
        assert_ne!(
            ValidationError::InvalidPostalCode.to_string(),
            ValidationError::UnsupportedProvider.to_string()
        );
    }

    #[test]
    fn test_error_response_omits_missing_data() {
        let body = serde_json::to_value(ErrorResponse::new("CEP não encontrado.")).unwrap();
        assert_eq!(body, json!({ "error": "CEP não encontrado." }));
    }

    #[test]
    fn test_error_response_keeps_payload() {
        let body = serde_json::to_value(ErrorResponse::with_data(
            "Dados de resposta inválidos.",
            json!({ "uf": "SP" }),
        ))
        .unwrap();
        assert_eq!(body["data"]["uf"], "SP");
    }
}
