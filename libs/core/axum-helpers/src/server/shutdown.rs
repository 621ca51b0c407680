use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Broadcasts process shutdown to every subsystem that subscribed.
///
/// One coordinator is created per server. `wait_for_signal` turns the first
/// SIGINT/SIGTERM into a broadcast; tasks that start after the broadcast can
/// still observe it through `is_shutting_down`.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    started: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Returns the coordinator together with its first subscription.
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (tx, rx) = broadcast::channel(1);
        let coordinator = Self {
            tx,
            started: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Register one more listener for the shutdown broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Whether shutdown has already started.
    pub fn is_shutting_down(&self) -> bool {
        self.started.load(Ordering::Relaxed)
    }

    /// Start the shutdown and notify subscribers.
    ///
    /// Idempotent: only the first call wins the flag and broadcasts.
    pub fn shutdown(&self) {
        let first = self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if first {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
        }
    }

    /// Block until SIGINT or SIGTERM arrives, then start the shutdown.
    pub async fn wait_for_signal(&self) {
        let received = termination_signal().await;
        info!("Received {received}, initiating graceful shutdown");
        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new().0
    }
}

/// Resolves when the process is asked to stop, naming the signal.
async fn termination_signal() -> &'static str {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT (Ctrl+C)",
        _ = terminate => "SIGTERM",
    }
}

/// Plain signal future for `axum::serve(...).with_graceful_shutdown`.
///
/// Drains in-flight requests and nothing else; there is no cleanup phase
/// and no deadline. `create_production_app` layers both on top through
/// [`ShutdownCoordinator`].
pub async fn shutdown_signal() {
    let received = termination_signal().await;
    info!("Received {received}, shutting down gracefully");
}

/// Shutdown future handed to axum by `create_production_app`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}
