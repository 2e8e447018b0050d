use super::{
    optional_text, passthrough, required_text, trim_base_url, CanonicalAddress, Provider,
    ProviderAdapter, UpstreamRequest,
};
use serde_json::{Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://www.cepaberto.com";

/// CepAberto: token-authenticated, supplies geocoding.
#[derive(Debug, Clone)]
pub struct CepAbertoAdapter {
    base_url: String,
    token: String,
}

impl CepAbertoAdapter {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            token: token.to_string(),
        }
    }
}

impl Default for CepAbertoAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, "")
    }
}

impl ProviderAdapter for CepAbertoAdapter {
    fn provider(&self) -> Provider {
        Provider::CepAberto
    }

    fn build_request(&self, postal_code: &str) -> UpstreamRequest {
        UpstreamRequest {
            url: format!("{}/api/v3/cep?cep={}", self.base_url, postal_code),
            headers: vec![(
                "Authorization".to_string(),
                format!("Token {}", self.token),
            )],
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
            neighborhood: required_text(payload, "bairro")?,
            city: named(payload, "cidade", "nome")?,
            state: named(payload, "estado", "sigla")?,
            latitude: passthrough(payload, "latitude"),
            longitude: passthrough(payload, "longitude"),
            altitude: passthrough(payload, "altitude"),
        })
    }
}

/// CepAberto nests city and state as objects (`{"nome": ...}`,
/// `{"sigla": ...}`); plain strings are accepted too.
fn named(payload: &Map<String, Value>, key: &str, inner: &str) -> Option<String> {
    match payload.get(key)? {
        Value::Object(nested) => required_text(nested, inner),
        _ => required_text(payload, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Outcome, UpstreamResponse};
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "altitude": 760.0,
            "cep": "01001000",
            "latitude": "-23.5479099981",
            "longitude": "-46.636",
            "logradouro": "Praça da Sé",
            "bairro": "Sé",
            "complemento": "lado ímpar",
            "cidade": { "ddd": 11, "ibge": "3550308", "nome": "São Paulo" },
            "estado": { "sigla": "SP" }
        })
    }

    #[test]
    fn test_build_request_carries_token() {
        let adapter = CepAbertoAdapter::new("https://www.cepaberto.com/", "secret");
        let request = adapter.build_request("01001-000");

        assert_eq!(
            request.url,
            "https://www.cepaberto.com/api/v3/cep?cep=01001-000"
        );
        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Token secret".to_string())]
        );
    }

    #[test]
    fn test_parse_success_with_geocoding() {
        let response = UpstreamResponse::json(200, sample().to_string());
        let outcome = CepAbertoAdapter::default().parse_response("01001000", &response);

        let address = match outcome {
            Outcome::Success(address) => address,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(address.street, "Praça da Sé");
        assert_eq!(address.neighborhood, "Sé");
        assert_eq!(address.complement, "lado ímpar");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
        assert_eq!(address.latitude, Some(json!("-23.5479099981")));
        assert_eq!(address.longitude, Some(json!("-46.636")));
        assert_eq!(address.altitude, Some(json!(760.0)));
    }

    #[test]
    fn test_flat_city_and_state() {
        let payload = json!({
            "logradouro": "Praça da Sé",
            "bairro": "Sé",
            "cidade": "São Paulo",
            "estado": "SP"
        });
        let response = UpstreamResponse::json(200, payload.to_string());

        match CepAbertoAdapter::default().parse_response("01001000", &response) {
            Outcome::Success(address) => {
                assert_eq!(address.city, "São Paulo");
                assert_eq!(address.state, "SP");
                assert_eq!(address.complement, "");
                assert_eq!(address.latitude, None);
                assert_eq!(address.longitude, None);
                assert_eq!(address.altitude, None);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_each_required_field() {
        for field in ["logradouro", "bairro", "cidade", "estado"] {
            let mut payload = sample();
            payload.as_object_mut().unwrap().remove(field);
            let response = UpstreamResponse::json(200, payload.to_string());

            assert_eq!(
                CepAbertoAdapter::default().parse_response("01001000", &response),
                Outcome::UpstreamDataInvalid(payload),
                "missing {field}"
            );
        }
    }

    #[test]
    fn test_nested_city_without_name_is_invalid() {
        let mut payload = sample();
        payload["cidade"] = json!({ "ddd": 11 });
        let response = UpstreamResponse::json(200, payload.to_string());

        assert!(matches!(
            CepAbertoAdapter::default().parse_response("01001000", &response),
            Outcome::UpstreamDataInvalid(_)
        ));
    }

    #[test]
    fn test_empty_object_is_invalid() {
        // CepAberto answers an unknown CEP with 200 and `{}`.
        let response = UpstreamResponse::json(200, "{}");

        assert_eq!(
            CepAbertoAdapter::default().parse_response("99999999", &response),
            Outcome::UpstreamDataInvalid(json!({}))
        );
    }
}
