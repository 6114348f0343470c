// Path: crates/node/src/shutdown.rs

use std::future::Future;
use tokio::sync::watch;

/// Waits for `signal`, then flips readiness off and tells the server to stop.
///
/// If the signal cannot be installed the server keeps running: the sender is
/// held forever so the receiver never observes a change.
pub async fn forward_shutdown<F>(signal: F, shutdown_tx: watch::Sender<bool>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!(target: "gateway", "shutdown requested");
            agora_telemetry::http::set_ready(false);
            let _ = shutdown_tx.send(true);
        }
        Err(e) => {
            tracing::error!(target: "gateway", error = %e, "failed to listen for shutdown signal; serving until killed");
            std::future::pending::<()>().await;
            drop(shutdown_tx);
        }
    }
}
