use crate::error::GatewayError;
use crate::providers::{cepaberto, viacep};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Parser, Validate)]
#[command(name = "cep-gateway", version, about = "Rate-limited CEP lookup gateway")]
pub struct Config {
    /// Server bind address
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    #[validate(length(min = 1))]
    pub log_level: String,

    /// ViaCep base URL
    #[arg(long, env = "VIACEP_BASE_URL", default_value = viacep::DEFAULT_BASE_URL)]
    #[validate(url)]
    pub viacep_base_url: String,

    /// CepAberto base URL
    #[arg(long, env = "CEPABERTO_BASE_URL", default_value = cepaberto::DEFAULT_BASE_URL)]
    #[validate(url)]
    pub cepaberto_base_url: String,

    /// CepAberto API token
    #[arg(long, env = "CEPABERTO_TOKEN", default_value = "", hide_env_values = true)]
    pub cepaberto_token: String,

    /// Upstream request timeout in milliseconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", default_value_t = 10_000)]
    #[validate(range(min = 1, max = 120_000))]
    pub upstream_timeout_ms: u64,
}

impl Config {
    /// Load configuration from command-line arguments and environment variables
    pub fn from_env() -> Self {
        Config::parse()
    }

    /// Check field values that clap alone cannot enforce
    pub fn validate_settings(&self) -> Result<(), GatewayError> {
        self.validate()?;
        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn has_cepaberto_token(&self) -> bool {
        !self.cepaberto_token.trim().is_empty()
    }
}
