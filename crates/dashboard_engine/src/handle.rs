use std::sync::Arc;
use std::thread;

use tokio_util::sync::CancellationToken;

use dashboard_logging::{dash_info, dash_warn};

use crate::{ConnectError, ConnectionConfig, ConnectionManager, EventSink};

/// The application's one live connection, running on its own runtime thread.
///
/// Events reach the caller through the [`EventSink`] passed to
/// [`spawn`](Self::spawn); dropping the handle cancels the connection.
pub struct ConnectionHandle {
    cancel: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl ConnectionHandle {
    pub fn spawn(
        config: ConnectionConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ConnectError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| ConnectError::Runtime(err.to_string()))?;
        let cancel = CancellationToken::new();
        let manager = ConnectionManager::new(config);

        let token = cancel.clone();
        let worker = thread::Builder::new()
            .name("dashboard-connection".to_string())
            .spawn(move || {
                runtime.block_on(manager.run(sink.as_ref(), token));
                dash_info!("Connection worker exited");
            })
            .map_err(|err| ConnectError::Runtime(err.to_string()))?;

        Ok(Self {
            cancel,
            worker: Some(worker),
        })
    }

    /// Close the connection and wait for the worker thread to stop.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                dash_warn!("Connection worker panicked");
            }
        }
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
