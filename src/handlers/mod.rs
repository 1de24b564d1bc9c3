//! HTTP request handlers for the query API.

pub mod app;
pub mod cities;
pub mod health;
pub mod index;
pub mod metrics;
pub mod weather;

pub use app::*;
pub use cities::*;
pub use health::*;
pub use index::*;
pub use metrics::*;
pub use weather::*;
