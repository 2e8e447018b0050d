use super::{
    optional_text, required_text, trim_base_url, CanonicalAddress, Provider, ProviderAdapter,
    UpstreamRequest,
};
use serde_json::{Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// ViaCep: public, unauthenticated, no geocoding.
#[derive(Debug, Clone)]
pub struct ViaCepAdapter {
    base_url: String,
}

impl ViaCepAdapter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: trim_base_url(base_url),
        }
    }
}

impl Default for ViaCepAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProviderAdapter for ViaCepAdapter {
    fn provider(&self) -> Provider {
        Provider::ViaCep
    }

    fn build_request(&self, postal_code: &str) -> UpstreamRequest {
        UpstreamRequest {
            url: format!("{}/ws/{}/json/", self.base_url, postal_code),
            headers: Vec::new(),
        }
    }

    fn map_payload(
        &self,
        postal_code: &str,
        payload: &Map<String, Value>,
    ) -> Option<CanonicalAddress> {
        Some(CanonicalAddress {
            postal_code: postal_code.to_string(),
            street: required_text(payload, "logradouro")?,
            complement: optional_text(payload, "complemento"),
            neighborhood: optional_text(payload, "bairro"),
            city: required_text(payload, "localidade")?,
            state: required_text(payload, "uf")?,
            latitude: None,
            longitude: None,
            altitude: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Outcome, UpstreamResponse};
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308"
        })
    }

    #[test]
    fn test_build_request() {
        let request = ViaCepAdapter::default().build_request("01001000");
        assert_eq!(request.url, "https://viacep.com.br/ws/01001000/json/");
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_build_request_trims_base_url() {
        let request = ViaCepAdapter::new("http://127.0.0.1:9000/").build_request("01001-000");
        assert_eq!(request.url, "http://127.0.0.1:9000/ws/01001-000/json/");
    }

    #[test]
    fn test_parse_success() {
        let response = UpstreamResponse::json(200, sample().to_string());
        let outcome = ViaCepAdapter::default().parse_response("01001000", &response);

        let address = match outcome {
            Outcome::Success(address) => address,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(address.postal_code, "01001000");
        assert_eq!(address.street, "Praça da Sé");
        assert_eq!(address.complement, "lado ímpar");
        assert_eq!(address.neighborhood, "Sé");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
        assert_eq!(address.latitude, None);
        assert_eq!(address.altitude, None);
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let payload = json!({
            "logradouro": "Praça da Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        });
        let response = UpstreamResponse::json(200, payload.to_string());

        match ViaCepAdapter::default().parse_response("01001-000", &response) {
            Outcome::Success(address) => {
                assert_eq!(address.neighborhood, "");
                assert_eq!(address.complement, "");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_each_required_field() {
        for field in ["logradouro", "localidade", "uf"] {
            let mut payload = sample();
            payload.as_object_mut().unwrap().remove(field);
            let response = UpstreamResponse::json(200, payload.to_string());

            assert_eq!(
                ViaCepAdapter::default().parse_response("01001000", &response),
                Outcome::UpstreamDataInvalid(payload),
                "missing {field}"
            );
        }
    }

    #[test]
    fn test_empty_street_is_invalid() {
        let mut payload = sample();
        payload["logradouro"] = json!("");
        let response = UpstreamResponse::json(200, payload.to_string());

        assert!(matches!(
            ViaCepAdapter::default().parse_response("01001000", &response),
            Outcome::UpstreamDataInvalid(_)
        ));
    }

    #[test]
    fn test_error_marker_payload_is_invalid() {
        let response = UpstreamResponse::json(200, r#"{"erro": "true"}"#);

        assert_eq!(
            ViaCepAdapter::default().parse_response("99999999", &response),
            Outcome::UpstreamDataInvalid(json!({ "erro": "true" }))
        );
    }
}
