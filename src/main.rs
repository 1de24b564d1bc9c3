use std::{error::Error, process, sync::Arc};
use weather_reminder::{
    AppConfig, Notifier, ProviderConfig, Scheduler, WeatherClient, WeatherTask, logging,
    shutdown::{exit_on_signal, shutdown_signal},
};

/// Load configuration and assemble the report task
fn startup() -> Result<(AppConfig, WeatherTask<Notifier>), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let client = WeatherClient::new(ProviderConfig::from_env())?;
    let notifier = Notifier::new(&config.notification)?;
    let task = WeatherTask::new(client, config.cities.clone(), notifier);
    Ok((config, task))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_tracing();

    println!("\n🚀 天气提醒服务启动 Weather Reminder Service Starting...\n");

    let (config, task) = match startup() {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(error = %e, "启动失败 Startup failed");
            process::exit(1);
        }
    };

    let names: Vec<&str> = config.cities.iter().map(|c| c.name.as_str()).collect();
    tracing::info!(cities = %names.join(", "), "Monitoring cities");
    tracing::info!(
        enabled = config.notification.enabled,
        method = config.notification.method.as_str(),
        "Notification settings"
    );

    let mut scheduler = Scheduler::new(Arc::new(task), config.schedule.clone());
    if scheduler.start().is_ok() {
        println!("💡 服务运行中... Service is running... Press Ctrl+C to stop\n");
    }

    // A rejected schedule has already been logged; keep running until signalled
    let signal = shutdown_signal().await;
    exit_on_signal(signal);
}
