//! One run of the fetch, format and notify pipeline.

use crate::{
    config::City,
    services::{
        notifier::ReportNotifier,
        report::{format_report, local_timestamp},
        scheduler::ScheduledJob,
        weather::WeatherClient,
    },
};
use chrono::Utc;
use std::sync::Arc;

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// A report was produced for `cities` cities and handed to the notifier
    Completed { cities: usize },
    /// No city could be fetched; nothing was reported
    NoData,
}

/// The scheduled weather report task
pub struct WeatherTask<N> {
    client: WeatherClient,
    cities: Arc<[City]>,
    notifier: N,
}

impl<N: ReportNotifier> WeatherTask<N> {
    pub fn new(client: WeatherClient, cities: impl Into<Arc<[City]>>, notifier: N) -> Self {
        Self {
            client,
            cities: cities.into(),
            notifier,
        }
    }

    /// Fetch every city, format the report and deliver it
    pub async fn execute(&self) -> TaskOutcome {
        tracing::info!(
            triggered_at = %local_timestamp(Utc::now()),
            cities = self.cities.len(),
            "Scheduled task triggered, fetching weather data"
        );

        let aggregate = self.client.fetch_all(&self.cities).await;
        if aggregate.is_empty() {
            tracing::error!(
                requested = aggregate.requested,
                "No weather data retrieved"
            );
            return TaskOutcome::NoData;
        }

        if aggregate.failed() > 0 {
            tracing::warn!(
                failed = aggregate.failed(),
                requested = aggregate.requested,
                "Some cities are missing from this report"
            );
        }

        let report = format_report(&aggregate.records);
        if !self.notifier.writes_to_console() {
            println!("{report}");
        }

        self.notifier.notify(&report).await;

        tracing::info!(cities = aggregate.records.len(), "Weather task completed");
        TaskOutcome::Completed {
            cities: aggregate.records.len(),
        }
    }
}

impl<N: ReportNotifier + 'static> ScheduledJob for WeatherTask<N> {
    async fn run(&self) {
        self.execute().await;
    }
}
