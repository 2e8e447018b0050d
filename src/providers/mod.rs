//! Upstream postal code providers.
//!
//! Each provider is an adapter implementing [`ProviderAdapter`]: it knows how
//! to address the upstream service and how to turn its payload into a
//! [`CanonicalAddress`]. The checks every provider shares (content type,
//! not-found status, JSON decoding) live in the trait's provided
//! [`ProviderAdapter::parse_response`].
//!
//! Supporting another provider means adding a [`Provider`] variant, an
//! adapter module, and a field on [`ProviderSet`].

pub mod cepaberto;
pub mod models;
pub mod viacep;

pub use cepaberto::CepAbertoAdapter;
pub use models::{CanonicalAddress, Outcome, Rejection, UpstreamRequest, UpstreamResponse};
pub use viacep::ViaCepAdapter;

use crate::error::TransportError;
use serde_json::{Map, Value};
use std::fmt;

/// Providers a caller may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    ViaCep,
    CepAberto,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::ViaCep, Provider::CepAberto];

    /// Identifier used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Provider::ViaCep => "viacep",
            Provider::CepAberto => "cepaberto",
        }
    }

    /// Case-insensitive lookup by identifier.
    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.name().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Builds the upstream call for an already validated postal code.
    fn build_request(&self, postal_code: &str) -> UpstreamRequest;

    /// Maps a decoded upstream JSON object to the canonical address, or
    /// `None` when a field this provider requires is missing or empty.
    fn map_payload(
        &self,
        postal_code: &str,
        payload: &Map<String, Value>,
    ) -> Option<CanonicalAddress>;

    /// Normalizes whatever the provider answered into an [`Outcome`].
    fn parse_response(&self, postal_code: &str, response: &UpstreamResponse) -> Outcome {
        if !response.is_json() {
            return Outcome::TransportFailure(TransportError::NonJsonResponse.to_string());
        }

        if response.status == 404 {
            return Outcome::NotFound;
        }

        let payload: Value = match serde_json::from_str(&response.body) {
            Ok(payload) => payload,
            Err(e) => {
                let error = TransportError::InvalidBody(e.to_string());
                return Outcome::TransportFailure(error.to_string());
            }
        };

        let address = payload
            .as_object()
            .and_then(|fields| self.map_payload(postal_code, fields));

        match address {
            Some(address) => Outcome::Success(address),
            None => Outcome::UpstreamDataInvalid(payload),
        }
    }
}

/// One adapter per supported provider, built once at startup.
pub struct ProviderSet {
    viacep: ViaCepAdapter,
    cepaberto: CepAbertoAdapter,
}

impl ProviderSet {
    pub fn new(viacep: ViaCepAdapter, cepaberto: CepAbertoAdapter) -> Self {
        Self { viacep, cepaberto }
    }

    pub fn adapter(&self, provider: Provider) -> &dyn ProviderAdapter {
        match provider {
            Provider::ViaCep => &self.viacep,
            Provider::CepAberto => &self.cepaberto,
        }
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::new(ViaCepAdapter::default(), CepAbertoAdapter::default())
    }
}

/// A field that must carry a non-empty string. Any other JSON type counts
/// as missing.
pub(crate) fn required_text(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A field that falls back to an empty string.
pub(crate) fn optional_text(payload: &Map<String, Value>, key: &str) -> String {
    required_text(payload, key).unwrap_or_default()
}

/// A field passed through untouched when present.
pub(crate) fn passthrough(payload: &Map<String, Value>, key: &str) -> Option<Value> {
    payload.get(key).filter(|value| !value.is_null()).cloned()
}

pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
