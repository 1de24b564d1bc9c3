//! Cron-driven scheduler for the report task.
//!
//! The scheduler starts out idle. [`Scheduler::start`] validates the cron
//! expression and timezone, runs the job once right away, then runs it on
//! every cron tick. Once running it stays running until the process exits.
//! Ticks do not wait for a previous run to finish, so runs may overlap.

use crate::config::ScheduleConfig;
use chrono::Utc;
use chrono_tz::Tz;
use cron::Schedule;
use std::{future::Future, str::FromStr, sync::Arc, time::Duration};
use tokio::task::JoinHandle;

/// Work the scheduler invokes on every tick
pub trait ScheduledJob: Send + Sync + 'static {
    fn run(&self) -> impl Future<Output = ()> + Send;
}

/// Errors that prevent the scheduler from starting
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Invalid cron expression '{expression}': {source}")]
    InvalidCron {
        expression: String,
        #[source]
        source: cron::error::Error,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Scheduler is already running")]
    AlreadyRunning,
}

/// Lifecycle state of a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Runs a job immediately and then on a cron schedule
pub struct Scheduler<J> {
    job: Arc<J>,
    config: ScheduleConfig,
    state: SchedulerState,
}

impl<J: ScheduledJob> Scheduler<J> {
    pub fn new(job: Arc<J>, config: ScheduleConfig) -> Self {
        Self {
            job,
            config,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Validate the schedule, run the job once, and register it for every tick.
    ///
    /// Validation failures are logged and returned; nothing is scheduled and
    /// the job does not run.
    pub fn start(&mut self) -> Result<JoinHandle<()>, SchedulerError> {
        if self.state == SchedulerState::Running {
            return Err(SchedulerError::AlreadyRunning);
        }

        tracing::info!(
            cron = %self.config.cron,
            description = %self.config.description,
            timezone = %self.config.timezone,
            "Starting scheduler"
        );

        let schedule = parse_cron(&self.config.cron).inspect_err(|e| {
            tracing::error!(error = %e, "Invalid cron expression, scheduling aborted");
        })?;
        let timezone = parse_timezone(&self.config.timezone).inspect_err(|e| {
            tracing::error!(error = %e, "Invalid timezone, scheduling aborted");
        })?;

        tracing::info!("Initial run, executing job now");
        let job = Arc::clone(&self.job);
        tokio::spawn(async move { job.run().await });

        let job = Arc::clone(&self.job);
        let handle = tokio::spawn(async move {
            let mut upcoming = schedule.upcoming(timezone);
            while let Some(next) = upcoming.next() {
                let wait = (next.with_timezone(&Utc) - Utc::now())
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                tracing::debug!(next = %next, "Waiting for next tick");
                tokio::time::sleep(wait).await;

                let job = Arc::clone(&job);
                tokio::spawn(async move { job.run().await });
            }
            tracing::warn!("Cron schedule has no further ticks");
        });

        self.state = SchedulerState::Running;
        tracing::info!("Scheduled task configured successfully");
        Ok(handle)
    }
}

/// Parse a cron expression.
///
/// Five-field expressions use Unix syntax (minute first, day-of-week 0-7 with
/// Sunday as 0 or 7). They get a leading seconds field of `0` and their
/// numeric weekdays are rewritten as day names. Six- and seven-field
/// expressions use the `cron` crate's own syntax.
pub fn parse_cron(expression: &str) -> Result<Schedule, SchedulerError> {
    let normalized = normalize_cron(expression);
    Schedule::from_str(&normalized).map_err(|source| SchedulerError::InvalidCron {
        expression: expression.to_string(),
        source,
    })
}

fn normalize_cron(expression: &str) -> String {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() == 5 {
        let day_of_week = unix_day_of_week(fields[4]);
        format!("0 {} {}", fields[..4].join(" "), day_of_week)
    } else {
        fields.join(" ")
    }
}

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Rewrite a Unix day-of-week field as a list of day names.
///
/// Fields that already use names, or that do not parse as Unix numbers, are
/// returned unchanged so the `cron` parser reports them.
fn unix_day_of_week(field: &str) -> String {
    if field == "*" || field == "?" || field.chars().any(|c| c.is_ascii_alphabetic()) {
        return field.to_string();
    }

    let mut days = [false; 7];
    for element in field.split(',') {
        match unix_day_range(element) {
            Some(selected) => selected.for_each(|day| days[day % 7] = true),
            None => return field.to_string(),
        }
    }

    if days.iter().all(|&selected| selected) {
        return "*".to_string();
    }

    DAY_NAMES
        .iter()
        .zip(days)
        .filter_map(|(name, selected)| selected.then_some(*name))
        .collect::<Vec<_>>()
        .join(",")
}

/// Days selected by one list element: `*`, `n`, `a-b`, each with an optional `/step`
fn unix_day_range(element: &str) -> Option<std::iter::StepBy<std::ops::RangeInclusive<usize>>> {
    let (base, step) = match element.split_once('/') {
        Some((base, step)) => (base, step.parse::<usize>().ok()?),
        None => (element, 1),
    };
    if step == 0 {
        return None;
    }

    let (start, end) = match base.split_once('-') {
        _ if base == "*" => (0, 6),
        Some((start, end)) => (start.parse().ok()?, end.parse().ok()?),
        // `n/step` runs from n to the end of the week
        None if element.contains('/') => (base.parse().ok()?, 6),
        None => {
            let day = base.parse().ok()?;
            (day, day)
        }
    };
    if start > end || end > 7 {
        return None;
    }

    Some((start..=end).step_by(step))
}

/// Parse an IANA timezone name such as `Asia/Shanghai`
pub fn parse_timezone(name: &str) -> Result<Tz, SchedulerError> {
    name.parse::<Tz>()
        .map_err(|_| SchedulerError::InvalidTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingJob {
        runs: AtomicUsize,
    }

    impl ScheduledJob for CountingJob {
        async fn run(&self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn schedule(cron: &str, timezone: &str) -> ScheduleConfig {
        ScheduleConfig {
            cron: cron.to_string(),
            description: "test".to_string(),
            timezone: timezone.to_string(),
        }
    }

    #[test]
    fn test_normalize_cron() {
        assert_eq!(normalize_cron("0 8 * * *"), "0 0 8 * * *");
        assert_eq!(normalize_cron("  30   7 * * Mon-Fri "), "0 30 7 * * Mon-Fri");
        assert_eq!(normalize_cron("*/5 * * * * *"), "*/5 * * * * *");
        assert_eq!(normalize_cron("0 8 * * 1-5"), "0 0 8 * * Mon,Tue,Wed,Thu,Fri");
        assert_eq!(normalize_cron("0 8 * * 0-7"), "0 0 8 * * *");
    }

    #[test]
    fn test_unix_day_of_week() {
        assert_eq!(unix_day_of_week("0"), "Sun");
        assert_eq!(unix_day_of_week("7"), "Sun");
        assert_eq!(unix_day_of_week("6,0"), "Sun,Sat");
        assert_eq!(unix_day_of_week("*/2"), "Sun,Tue,Thu,Sat");
        assert_eq!(unix_day_of_week("1-5/2"), "Mon,Wed,Fri");
        assert_eq!(unix_day_of_week("3/2"), "Wed,Fri");
        assert_eq!(unix_day_of_week("SAT,SUN"), "SAT,SUN");
        // Left for the cron parser to reject
        assert_eq!(unix_day_of_week("8"), "8");
        assert_eq!(unix_day_of_week("5-1"), "5-1");
        assert!(parse_cron("0 8 * * 8").is_err());
    }

    /// Weekdays of the first `count` firings after Saturday 2024-03-02
    fn firing_days(expression: &str, count: usize) -> Vec<chrono::Weekday> {
        use chrono::{Datelike, TimeZone};

        let saturday = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        parse_cron(expression)
            .unwrap()
            .after(&saturday)
            .take(count)
            .map(|at| at.weekday())
            .collect()
    }

    #[test]
    fn test_five_field_weekdays_follow_unix_numbering() {
        use chrono::Weekday::*;

        assert_eq!(firing_days("0 8 * * 1-5", 5), [Mon, Tue, Wed, Thu, Fri]);
        assert_eq!(firing_days("0 8 * * 0", 2), [Sun, Sun]);
        assert_eq!(firing_days("0 8 * * 7", 2), [Sun, Sun]);
        assert_eq!(firing_days("0 8 * * */2", 4), [Sun, Tue, Thu, Sat]);
        assert_eq!(firing_days("0 8 * * Mon-Fri", 5), [Mon, Tue, Wed, Thu, Fri]);
    }

    #[test]
    fn test_parse_cron() {
        assert!(parse_cron("0 8 * * *").is_ok());
        assert!(parse_cron("0 0 8,20 * * *").is_ok());
        assert!(matches!(
            parse_cron("xx xx xx"),
            Err(SchedulerError::InvalidCron { .. })
        ));
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Shanghai").unwrap(), chrono_tz::Asia::Shanghai);
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(SchedulerError::InvalidTimezone(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_cron_never_runs_job() {
        let job = Arc::new(CountingJob::default());
        let mut scheduler = Scheduler::new(Arc::clone(&job), schedule("xx xx xx", "Asia/Shanghai"));

        let result = scheduler.start();
        assert!(matches!(result, Err(SchedulerError::InvalidCron { .. })));
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_timezone_never_runs_job() {
        let job = Arc::new(CountingJob::default());
        let mut scheduler = Scheduler::new(Arc::clone(&job), schedule("0 8 * * *", "Nowhere/City"));

        assert!(matches!(
            scheduler.start(),
            Err(SchedulerError::InvalidTimezone(_))
        ));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_runs_immediately_then_on_ticks() {
        let job = Arc::new(CountingJob::default());
        let mut scheduler = Scheduler::new(Arc::clone(&job), schedule("* * * * * *", "UTC"));

        let handle = scheduler.start().unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Running);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(job.runs.load(Ordering::SeqCst) >= 2);

        assert!(matches!(
            scheduler.start(),
            Err(SchedulerError::AlreadyRunning)
        ));
        handle.abort();
    }

    #[tokio::test]
    async fn test_daily_schedule_only_runs_once_immediately() {
        let job = Arc::new(CountingJob::default());
        let mut scheduler = Scheduler::new(Arc::clone(&job), schedule("0 0 1 1 *", "Asia/Shanghai"));

        let handle = scheduler.start().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 1);
        handle.abort();
    }
}
