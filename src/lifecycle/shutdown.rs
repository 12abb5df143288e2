//! Shutdown coordination for the gate.

use tokio::sync::broadcast;

/// Hands out [`ShutdownSignal`]s and fires them all at once.
///
/// The server loop holds one signal; tests hold the coordinator and trigger
/// it to tear the server down instead of sending process signals.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

/// One consumer's view of the shutdown signal.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a signal for one consumer to wait on.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Fire every outstanding signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolves once shutdown is triggered. A dropped coordinator counts as
    /// a trigger; a vanished owner means stop, not run forever.
    pub async fn wait(mut self) {
        let _ = self.rx.recv().await;
    }
}
