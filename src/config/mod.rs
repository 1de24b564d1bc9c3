//! Configuration structures and loading utilities.
//!
//! The configuration file (cities, schedule, notification) is loaded once at
//! startup and handed to each component. Process-level settings such as the
//! listen port or provider URL come from environment variables with defaults.

pub mod app;
pub mod cors;
pub mod provider;
pub mod server;

pub use app::*;
pub use cors::*;
pub use provider::*;
pub use server::*;
