//! Termination signal handling.
//!
//! [`ShutdownSignal::install`] registers the handlers *before* any X
//! resource is created.  From then on SIGINT and SIGTERM no longer kill the
//! process; they are queued until [`ShutdownSignal::wait`] is polled, which
//! happens once the overlay is painted.  A signal that arrives during set-up
//! therefore still leads to an orderly teardown right after set-up finishes.

use tracing::info;

use crate::application::platform::OverlayError;

/// Pending SIGINT/SIGTERM listeners.
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Registers the signal handlers.  Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Signal`] if a handler cannot be registered.
    #[cfg(unix)]
    pub fn install() -> Result<Self, OverlayError> {
        use tokio::signal::unix::{signal, SignalKind};

        let interrupt =
            signal(SignalKind::interrupt()).map_err(|e| OverlayError::Signal(e.to_string()))?;
        let terminate =
            signal(SignalKind::terminate()).map_err(|e| OverlayError::Signal(e.to_string()))?;
        Ok(Self {
            interrupt,
            terminate,
        })
    }

    /// Registers the Ctrl+C handler on platforms without Unix signals.
    #[cfg(not(unix))]
    pub fn install() -> Result<Self, OverlayError> {
        Ok(Self {})
    }

    /// Resolves when SIGINT or SIGTERM arrives.  No timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Signal`] if the signal stream closes without
    /// delivering a signal.
    #[cfg(unix)]
    pub async fn wait(&mut self) -> Result<(), OverlayError> {
        let name = tokio::select! {
            got = self.interrupt.recv() => got.map(|_| "SIGINT"),
            got = self.terminate.recv() => got.map(|_| "SIGTERM"),
        };
        match name {
            Some(name) => {
                info!("received {name}");
                Ok(())
            }
            None => Err(OverlayError::Signal("signal stream closed".to_string())),
        }
    }

    /// Resolves when Ctrl+C is pressed.
    #[cfg(not(unix))]
    pub async fn wait(&mut self) -> Result<(), OverlayError> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| OverlayError::Signal(e.to_string()))?;
        info!("received Ctrl+C");
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_succeeds_inside_runtime() {
        assert!(ShutdownSignal::install().is_ok());
    }

    #[tokio::test]
    async fn test_wait_is_pending_without_a_signal() {
        // Arrange
        let mut signal = ShutdownSignal::install().expect("install");

        // Act
        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(50), signal.wait()).await;

        // Assert: no signal was sent, so the wait must still be pending
        assert!(waited.is_err());
    }
}
