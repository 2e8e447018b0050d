use serde::Serialize;
use serde_json::Value;

/// An outbound call to a provider, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// What the transport got back from a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl UpstreamResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    /// Media types are case-insensitive; parameters such as charset are ignored.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

/// The one address shape returned for every provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalAddress {
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Value>,
}

/// Why a lookup was turned away before reaching a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidPostalCode,
    UnsupportedProvider,
    RateLimitExceeded,
}

/// Result of a single lookup. Built once per request and mapped to a response
/// in [`crate::response::GatewayResponse::from_outcome`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(CanonicalAddress),
    Rejected(Rejection),
    NotFound,
    UpstreamDataInvalid(Value),
    TransportFailure(String),
}

impl Outcome {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Rejected(Rejection::RateLimitExceeded) => "rate_limited",
            Outcome::Rejected(_) => "invalid_input",
            Outcome::NotFound => "not_found",
            Outcome::UpstreamDataInvalid(_) => "upstream_data_invalid",
            Outcome::TransportFailure(_) => "transport_failure",
        }
    }
}
