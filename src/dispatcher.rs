use crate::clock::Clock;
use crate::providers::{Outcome, ProviderSet, Rejection};
use crate::rate_limiter::RateLimiter;
use crate::response::GatewayResponse;
use crate::transport::Transport;
use crate::validation::{LookupRequest, RequestValidator};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs a lookup end to end: validate, admit, call the provider, normalize.
///
/// Every step short-circuits into an [`Outcome`]; the outcome is turned into a
/// response once, at the end. Nothing here returns an error to the caller.
pub struct Dispatcher {
    rate_limiter: Arc<RateLimiter>,
    providers: ProviderSet,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    pub fn new(
        rate_limiter: Arc<RateLimiter>,
        providers: ProviderSet,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rate_limiter,
            providers,
            transport,
            clock,
        }
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    pub async fn handle(&self, raw_postal_code: &str, raw_provider: &str) -> GatewayResponse {
        let outcome = self.lookup(raw_postal_code, raw_provider).await;

        match &outcome {
            Outcome::Success(_) | Outcome::NotFound => info!(
                cep = raw_postal_code,
                provider = raw_provider,
                outcome = outcome.kind(),
                "Lookup finished"
            ),
            Outcome::Rejected(Rejection::RateLimitExceeded) => warn!(
                cep = raw_postal_code,
                provider = raw_provider,
                "Rate limit exceeded"
            ),
            Outcome::Rejected(_) => debug!(
                cep = raw_postal_code,
                provider = raw_provider,
                outcome = outcome.kind(),
                "Lookup rejected"
            ),
            Outcome::UpstreamDataInvalid(payload) => warn!(
                cep = raw_postal_code,
                provider = raw_provider,
                payload = %payload,
                "Upstream returned incomplete data"
            ),
            Outcome::TransportFailure(message) => warn!(
                cep = raw_postal_code,
                provider = raw_provider,
                error = %message,
                "Upstream call failed"
            ),
        }

        GatewayResponse::from_outcome(outcome)
    }

    async fn lookup(&self, raw_postal_code: &str, raw_provider: &str) -> Outcome {
        let request = match RequestValidator::validate(raw_postal_code, raw_provider) {
            Ok(request) => request,
            Err(e) => return Outcome::Rejected(e.into()),
        };

        // Synchronous; no await between the count and the record.
        if !self.rate_limiter.admit(self.clock.now_millis()) {
            return Outcome::Rejected(Rejection::RateLimitExceeded);
        }

        self.call_provider(&request).await
    }

    async fn call_provider(&self, request: &LookupRequest) -> Outcome {
        let adapter = self.providers.adapter(request.provider);
        let upstream = adapter.build_request(&request.postal_code);

        debug!(provider = %request.provider, url = %upstream.url, "Calling upstream provider");

        // A panicking transport still yields a structured 500.
        let fetched = AssertUnwindSafe(self.transport.fetch(&upstream))
            .catch_unwind()
            .await;

        match fetched {
            Ok(Ok(response)) => adapter.parse_response(&request.postal_code, &response),
            Ok(Err(e)) => Outcome::TransportFailure(e.to_string()),
            Err(panic) => Outcome::TransportFailure(panic_message(&*panic)),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "transport panicked".to_string()
    }
}
