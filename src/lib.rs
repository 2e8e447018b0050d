pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
pub mod providers;
pub mod rate_limiter;
pub mod response;
pub mod server;
pub mod transport;
pub mod validation;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{GatewayError, Result};
pub use response::GatewayResponse;
pub use server::create_app;
