//! Data models shared by the pipeline and the HTTP surface.

pub mod api;
pub mod weather;

pub use api::*;
pub use weather::*;
