use actix_web::{HttpServer, web};
use std::process;
use weather_reminder::{
    AppConfig, AppMetrics, AppState, CorsConfig, ProviderConfig, ServerConfig, WeatherClient,
    create_app, logging,
    shutdown::{exit_on_signal, shutdown_signal},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    logging::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "启动失败 Startup failed");
            process::exit(1);
        }
    };
    let server_config = ServerConfig::from_env();

    let metrics = if server_config.metrics_enabled {
        AppMetrics::new()
            .inspect_err(|e| tracing::warn!(error = %e, "Metrics unavailable, continuing without"))
            .ok()
    } else {
        None
    };

    let mut client = WeatherClient::new(ProviderConfig::from_env()).map_err(std::io::Error::other)?;
    if let Some(metrics) = &metrics {
        client = client.with_metrics(metrics.clone());
    }

    let state = web::Data::new(AppState::new(config.cities, client));
    let cors = CorsConfig::from_env();

    let server = HttpServer::new(move || create_app(state.clone(), metrics.clone(), cors.clone()))
        .disable_signals()
        .bind(server_config.listen_addr())?
        .run();

    println!("{}", "=".repeat(60));
    println!("🌤️  Weather Reminder Web Server | 天气提醒网页服务");
    println!("{}", "=".repeat(60));
    tracing::info!(
        bind_address = %server_config.bind_address,
        port = server_config.port,
        "Server running; endpoints: GET /api/weather, GET /api/cities, GET /api/health"
    );

    tokio::select! {
        result = server => result,
        signal = shutdown_signal() => exit_on_signal(signal),
    }
}
