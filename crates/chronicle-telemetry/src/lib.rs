//! Chronicle Telemetry - logging setup for applications using the Chronicle client.
//!
//! The client crates only emit `tracing` events. This crate installs a
//! subscriber for them with a configurable level, format and target.
//!
//! # Example
//!
//! ```rust,no_run
//! use chronicle_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), chronicle_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("chronicle_client=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("Logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
