//! Controllable test doubles for the clock and transport seams.
//!
//! Compiled for unit tests, or when the `test-helpers` feature is enabled.
//! The package turns the feature on for its own integration tests:
//! ```toml
//! [dev-dependencies]
//! cep-gateway = { path = ".", features = ["test-helpers"] }
//! ```

pub mod clock;
pub mod transport;

pub use clock::ManualClock;
pub use transport::{PanickingTransport, ScriptedTransport};
