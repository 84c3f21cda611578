//! Prelude module - commonly used types for convenient import.
//!
//! Use `use chronicle_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{TransportError, TransportResult};

// Wire types
pub use crate::{Headers, HttpRequest, HttpResponse, Method};

// Transport seam
pub use crate::Transport;
