//! Graceful Shutdown Module
//!
//! Signal handling and a bounded drain of in-flight requests.

use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Waits for SIGTERM or SIGINT
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Serves `router` on `listener` until `shutdown` resolves, then lets
/// in-flight requests finish for at most `shutdown_timeout`.
///
/// # Errors
///
/// Returns the server's I/O error if it stops on its own.
pub async fn run_with_graceful_shutdown<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    shutdown_timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        let _ = stop_rx.changed().await;
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut server => {
            info!("Server stopped without a shutdown signal");
            return result.map_err(io::Error::other)?;
        }
        () = shutdown => {
            info!("Shutdown signal received");
        }
    }

    let _ = stop_tx.send(true);

    match tokio::time::timeout(shutdown_timeout, &mut server).await {
        Ok(result) => {
            result.map_err(io::Error::other)??;
            info!("Shutdown complete");
        }
        Err(_) => {
            warn!("Shutdown timeout reached, aborting in-flight requests");
            server.abort();
        }
    }
    Ok(())
}
