//! Console reporting for the overlay binary.
//!
//! Standard output carries exactly two fixed lines, one when the overlay is
//! up and waiting and one when shutdown begins, so wrapper scripts can wait
//! for them.  Everything else goes through `tracing`, which the binary
//! routes to standard error.

use overlay_core::LifecycleState;
use tracing::{debug, info};

use crate::application::platform::OverlayError;
use crate::application::run_overlay::LifecycleObserver;

/// Printed once the overlay is painted and the process starts waiting.
pub const WAITING_MESSAGE: &str = "waiting for sigint to stdout";

/// Printed when the termination signal has been received.
pub const SHUTDOWN_MESSAGE: &str = "shutting down";

/// Returns the fixed stdout line for `state`, if it has one.
pub fn stdout_line(state: LifecycleState) -> Option<&'static str> {
    match state {
        LifecycleState::Waiting => Some(WAITING_MESSAGE),
        LifecycleState::ShuttingDown => Some(SHUTDOWN_MESSAGE),
        _ => None,
    }
}

/// [`LifecycleObserver`] that prints the fixed stdout lines and logs every
/// transition.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    /// Creates an observer that writes to the process's stdout.
    pub fn new() -> Self {
        Self
    }
}

impl LifecycleObserver for ConsoleObserver {
    fn on_transition(&mut self, state: LifecycleState) {
        info!(%state, "overlay lifecycle");
        if let Some(line) = stdout_line(state) {
            println!("{line}");
        }
    }

    /// The error itself is reported by the binary on exit; only the state
    /// reached is recorded here.
    fn on_failure(&mut self, reached: LifecycleState, error: &OverlayError) {
        debug!(%reached, "overlay set-up failed: {error}");
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Collects everything a test subscriber writes.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a subscriber filtered at the binary's default level.
    fn log_at_info(f: impl FnOnce()) -> String {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        log.text()
    }

    #[test]
    fn test_failure_is_not_logged_at_default_level() {
        // Arrange
        let mut observer = ConsoleObserver::new();

        // Act
        let logged = log_at_info(|| {
            observer.on_failure(LifecycleState::MonitorRegistered, &OverlayError::NoOutputs)
        });

        // Assert: the binary prints the error once on exit
        assert!(!logged.contains("no RandR outputs"), "logged: {logged}");
    }

    #[test]
    fn test_transitions_are_logged_at_default_level() {
        let logged = log_at_info(|| {
            ConsoleObserver::new().on_transition(LifecycleState::MonitorRegistered)
        });
        assert!(logged.contains("monitor-registered"), "logged: {logged}");
    }

    #[test]
    fn test_stdout_line_only_for_waiting_and_shutting_down() {
        for state in LifecycleState::ALL {
            let expected = match state {
                LifecycleState::Waiting => Some("waiting for sigint to stdout"),
                LifecycleState::ShuttingDown => Some("shutting down"),
                _ => None,
            };
            assert_eq!(stdout_line(state), expected, "state {state}");
        }
    }
}
