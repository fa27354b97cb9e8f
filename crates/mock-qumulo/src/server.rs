//! Running the fake appliance on a background task.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::ApplianceConfig;
use crate::routes::router;

/// A fake appliance listening on an ephemeral localhost port.
///
/// Dropping the handle aborts the server; [`stop`](Self::stop) shuts it
/// down gracefully instead.
pub struct FakeAppliance {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl FakeAppliance {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the listener cannot be bound.
    pub async fn spawn(config: ApplianceConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let (shutdown, signal) = oneshot::channel::<()>();
        let app = router(config);

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "fake appliance stopped");
            }
        });

        info!(address = %addr, "fake appliance listening");
        Ok(Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    /// Address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Port the server is bound to.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for FakeAppliance {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn spawn_accepts_connections_until_stopped() {
        let appliance = FakeAppliance::spawn(ApplianceConfig::default())
            .await
            .unwrap();
        let addr = appliance.addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_ne!(appliance.port(), 0);

        TcpStream::connect(addr).await.unwrap();

        appliance.stop().await;
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
