use crate::error::ValidationError;
use crate::providers::Provider;
use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only; `\d` would also admit other Unicode digit sets.
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{5}-[0-9]{3}|[0-9]{8})$").expect("postal code pattern is valid")
});

/// A lookup that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub postal_code: String,
    pub provider: Provider,
}

/// Request validation utilities
pub struct RequestValidator;

impl RequestValidator {
    /// Validates the raw `cep` and `service` fields of a lookup.
    ///
    /// The postal code is checked first, so a request that is wrong on both
    /// counts reports the postal code.
    pub fn validate(
        raw_postal_code: &str,
        raw_provider: &str,
    ) -> Result<LookupRequest, ValidationError> {
        Self::validate_postal_code(raw_postal_code)?;
        let provider = Self::validate_provider(raw_provider)?;

        Ok(LookupRequest {
            postal_code: raw_postal_code.to_string(),
            provider,
        })
    }

    /// Accepts `NNNNN-NNN` or eight contiguous digits, nothing else.
    pub fn validate_postal_code(raw: &str) -> Result<(), ValidationError> {
        if POSTAL_CODE.is_match(raw) {
            Ok(())
        } else {
            Err(ValidationError::InvalidPostalCode)
        }
    }

    pub fn validate_provider(raw: &str) -> Result<Provider, ValidationError> {
        Provider::from_name(raw).ok_or(ValidationError::UnsupportedProvider)
    }
}
