//! Lifecycle controller: set up, wait, tear down.
//!
//! # Sequence
//!
//! ```text
//! register_monitor ─► show_window ─► bind_surface + paint ─► wait
//!                                                              │
//!        terminated ◄─ drop window ◄─ drop monitor ◄─ drop surface
//! ```
//!
//! Creation order is monitor → window → surface.  Shutdown releases the
//! surface first, then unregisters the monitor, then destroys the window; the
//! display connection is closed by the caller when the platform is dropped.
//!
//! # Failure during set-up
//!
//! Every step returns a `Result`.  On error the function returns immediately
//! and the guards acquired so far go out of scope newest-first, so a failed
//! window creation still unregisters the monitor, and a failed paint still
//! releases the surface and the window.  The observer is told which state was
//! reached before the failure.

use std::future::Future;

use overlay_core::LifecycleState;
use tracing::debug;

use crate::application::platform::{OverlayError, OverlayPlatform};
use crate::domain::OverlayConfig;

/// Receives lifecycle progress from [`run_overlay`].
pub trait LifecycleObserver {
    /// Called once for every state entered, starting with `Uninitialized`.
    fn on_transition(&mut self, state: LifecycleState);

    /// Called when the run ends with an error, after the acquired resources
    /// have been released.  `reached` is the last state entered.
    fn on_failure(&mut self, reached: LifecycleState, error: &OverlayError) {
        let _ = (reached, error);
    }
}

/// Tracks the current state and forwards each transition to the observer.
struct Progress<'o> {
    state: LifecycleState,
    observer: &'o mut dyn LifecycleObserver,
}

impl Progress<'_> {
    fn advance(&mut self, to: LifecycleState) -> Result<(), OverlayError> {
        self.state = self.state.advance(to)?;
        self.observer.on_transition(to);
        Ok(())
    }
}

/// Runs the overlay from registration to teardown.
///
/// `shutdown` is awaited once everything is painted; it is the only point at
/// which this function suspends.  Pass a signal future in production and an
/// already-completed future in tests.
///
/// # Errors
///
/// Returns the first [`OverlayError`] raised by the platform or by
/// `shutdown`.  Resources acquired before the error are released before this
/// function returns.
pub async fn run_overlay<P, F>(
    platform: &P,
    config: &OverlayConfig,
    shutdown: F,
    observer: &mut dyn LifecycleObserver,
) -> Result<(), OverlayError>
where
    P: OverlayPlatform,
    F: Future<Output = Result<(), OverlayError>>,
{
    observer.on_transition(LifecycleState::Uninitialized);
    let mut progress = Progress {
        state: LifecycleState::Uninitialized,
        observer,
    };

    let result = drive(platform, config, shutdown, &mut progress).await;
    if let Err(e) = &result {
        progress.observer.on_failure(progress.state, e);
    }
    result
}

async fn drive<P, F>(
    platform: &P,
    config: &OverlayConfig,
    shutdown: F,
    progress: &mut Progress<'_>,
) -> Result<(), OverlayError>
where
    P: OverlayPlatform,
    F: Future<Output = Result<(), OverlayError>>,
{
    let monitor = platform.register_monitor(&config.monitor_spec())?;
    progress.advance(LifecycleState::MonitorRegistered)?;

    let window = platform.show_window(config.region)?;
    progress.advance(LifecycleState::WindowShown)?;

    let mut surface = platform.bind_surface(&window)?;
    platform.paint(&mut surface, &config.style)?;
    progress.advance(LifecycleState::Painted)?;

    progress.advance(LifecycleState::Waiting)?;
    shutdown.await?;
    progress.advance(LifecycleState::ShuttingDown)?;

    debug!("releasing drawing surface");
    drop(surface);
    debug!("unregistering virtual monitor");
    drop(monitor);
    debug!("destroying overlay window");
    drop(window);

    progress.advance(LifecycleState::Terminated)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
