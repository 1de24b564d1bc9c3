//! Fetch every configured city once, print the report and exit.

use std::process::ExitCode;
use weather_reminder::{AppConfig, ProviderConfig, WeatherClient, format_report, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "加载配置失败 Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match WeatherClient::new(ProviderConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create weather client");
            return ExitCode::FAILURE;
        }
    };

    let names: Vec<&str> = config.cities.iter().map(|c| c.name.as_str()).collect();
    tracing::info!(cities = %names.join(", "), "查询城市 Querying cities");

    let aggregate = client.fetch_all(&config.cities).await;
    if aggregate.is_empty() {
        tracing::error!("未能获取任何天气数据 No weather data retrieved");
        return ExitCode::FAILURE;
    }

    println!("{}", format_report(&aggregate.records));
    ExitCode::SUCCESS
}
