// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::accept_connection;
use super::listener::create_listener;
use super::signal::shutdown_signal;
use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// Poll interval while waiting for connections to drain
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// HTTP server bound to its listening socket
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
}

impl Server {
    /// Bind the listener configured in `state`
    pub fn bind(state: AppState) -> Result<Self, ServerError> {
        let addr = state.config.get_socket_addr()?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            state: Arc::new(state),
            active_connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Serve until SIGINT/SIGTERM
    pub async fn run(self) {
        self.run_until(shutdown_signal()).await;
    }

    /// Serve until `shutdown` resolves, then wait up to the configured grace period
    /// for open connections to finish
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut shutdown = std::pin::pin!(shutdown);

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            accept_connection(
                                stream,
                                peer_addr,
                                &self.state,
                                &self.active_connections,
                                shutdown_rx.clone(),
                            );
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = &mut shutdown => break,
            }
        }

        // Stop accepting before draining
        drop(self.listener);
        let _ = shutdown_tx.send(true);

        let grace = Duration::from_secs(self.state.config.performance.shutdown_timeout);
        let deadline = tokio::time::Instant::now() + grace;
        while self.active_connections.load(Ordering::SeqCst) > 0
            && tokio::time::Instant::now() < deadline
        {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }

        logger::log_shutdown_complete(self.active_connections.load(Ordering::SeqCst));
    }
}
