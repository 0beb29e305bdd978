use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::error::ContactServerError;
use crate::gate::{Clock, SubmissionGate, SystemClock};
use crate::server::routes::{AppState, build_router};
use crate::storage::LogSink;

pub struct Server {
    listener: TcpListener,
    state: AppState,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the listener with an in-memory rate store, the system clock and
    /// a logging sink.
    pub async fn new(config: ServerConfig) -> Result<Self, ContactServerError> {
        let gate = Arc::new(SubmissionGate::in_memory(&config.gate));
        let state = AppState::new(gate, Arc::new(LogSink), Arc::new(SystemClock));
        Self::with_state(config, state).await
    }

    /// Binds the listener around caller-supplied collaborators.
    pub async fn with_state(
        config: ServerConfig,
        state: AppState,
    ) -> Result<Self, ContactServerError> {
        let socket = config.server.listen_socket();
        let listener = TcpListener::bind(&socket).await?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            listener,
            state,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(self) -> Result<(), ContactServerError> {
        let gate_config = &self.config.gate;
        info!(
            "Starting contact gate on {} (max {} submissions per {}s per client)",
            self.local_addr()?,
            gate_config.max_requests,
            gate_config.window_secs
        );

        let sweeper = gate_config.sweep_interval().map(|every| {
            spawn_sweeper(
                Arc::clone(&self.state.gate),
                Arc::clone(&self.state.clock),
                every,
            )
        });

        let result = axum::serve(self.listener, build_router(self.state)).await;

        if let Some(handle) = sweeper {
            handle.abort();
        }
        result?;
        Ok(())
    }
}

/// Periodically drops rate records whose window has passed.
fn spawn_sweeper(
    gate: Arc<SubmissionGate>,
    clock: Arc<dyn Clock>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // first tick fires immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match gate.store().sweep(clock.now(), gate.window()) {
                Ok(0) => {}
                Ok(removed) => debug!("Swept {} expired rate records", removed),
                Err(e) => warn!("Rate record sweep failed: {}", e),
            }
        }
    })
}
