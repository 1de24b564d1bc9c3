//! Custom middleware implementations for the query server.

pub mod cors;
pub mod metrics;
pub mod request_id;

pub use cors::*;
pub use metrics::*;
pub use request_id::*;
