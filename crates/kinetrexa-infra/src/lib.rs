//! KineTrexa Infrastructure Library
//!
//! Shared infrastructure components:
//! - Middleware (request ID, security headers)
//! - Telemetry initialization (tracing)

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{
    get_request_id, request_id_middleware, security_headers_middleware, RequestId,
};
pub use telemetry::{init_telemetry, shutdown_telemetry};
