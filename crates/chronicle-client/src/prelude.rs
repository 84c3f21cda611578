//! Prelude module - commonly used types for convenient import.
//!
//! Use `use chronicle_client::prelude::*;` to import all essential types.

// Errors
pub use crate::{ChronicleError, ChronicleResult};

// Clients
pub use crate::{Client, ClientConfig, Endpoint, Replica, ReqwestTransport};

// Credentials and keys
pub use crate::{Credentials, KeyPair, PublicKey};

// Transport seam
pub use crate::{HttpRequest, HttpResponse, Transport, TransportError};
