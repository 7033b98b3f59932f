//! OS signal handling.

/// Resolve once Ctrl+C (SIGINT) is received.
///
/// If the handler cannot be installed this never resolves, so the server
/// keeps running and can still be stopped through `Shutdown`.
pub async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
