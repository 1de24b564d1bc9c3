//! Process signal handling.

/// Wait for SIGINT (Ctrl+C) or, on Unix, SIGTERM. Returns the signal name.
pub async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => "SIGINT",
                    _ = sigterm.recv() => "SIGTERM",
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unable to listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "SIGINT"
    }
}

/// Log a farewell and exit immediately with status 0. In-flight work is not drained.
pub fn exit_on_signal(signal: &str) -> ! {
    tracing::info!(signal, "收到停止信号，正在退出... Received stop signal, exiting...");
    std::process::exit(0)
}
