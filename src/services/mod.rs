//! Business logic and service layer modules.
//!
//! This module contains the report pipeline: the weather code table, the
//! forecast client and aggregator, the report formatter, notification
//! delivery, the pipeline task and its cron scheduler, plus metrics.

pub mod descriptions;
pub mod metrics;
pub mod notifier;
pub mod report;
pub mod scheduler;
pub mod task;
pub mod weather;

pub use descriptions::describe;
pub use metrics::*;
pub use notifier::*;
pub use report::*;
pub use scheduler::*;
pub use task::*;
pub use weather::*;
