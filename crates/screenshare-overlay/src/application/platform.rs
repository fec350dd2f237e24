//! The platform seam between the lifecycle controller and the window system.
//!
//! # Guard types (for beginners)
//!
//! Each resource is returned as a *guard*: a value whose `Drop`
//! implementation releases the resource.  Guards borrow what they depend on
//! (`Window<'p>` borrows the platform, `Surface<'w>` borrows the window), so
//! the borrow checker refuses any code that would release a dependency while
//! a dependent is still alive.  Early returns with `?` drop whatever has been
//! acquired so far, newest first, which is exactly the clean-up a failed
//! set-up needs.

use overlay_core::{HighlightStyle, LifecycleError, MonitorSpec, Region};
use thiserror::Error;

/// Errors that end the overlay.
///
/// Every variant is fatal: there are no retries, the process reports the
/// error and exits after dropping what it already acquired.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// No X display could be opened.
    #[error("cannot open X display: {0}")]
    DisplayUnavailable(String),

    /// The monitor name cannot be turned into an X atom.
    #[error("invalid monitor name '{0}'")]
    InvalidMonitorName(String),

    /// The root window has no RandR outputs to back a virtual monitor.
    #[error("no RandR outputs found; cannot register a virtual monitor")]
    NoOutputs,

    /// No output is designated primary, so there is nothing to bind the
    /// virtual monitor to.
    #[error("no primary RandR output is set; cannot register a virtual monitor")]
    NoPrimaryOutput,

    /// The X server rejected the virtual monitor.
    #[error("X server rejected virtual monitor '{name}': {detail}")]
    MonitorRejected { name: String, detail: String },

    /// No depth-32 TrueColor visual exists on the default screen.
    #[error("No visual found supporting 32 bit color, terminating")]
    NoArgbVisual,

    /// The overlay window could not be created.
    #[error("failed to create overlay window: {0}")]
    WindowCreation(String),

    /// The drawing surface or context could not be created.
    #[error("failed to bind drawing surface: {0}")]
    Surface(String),

    /// Painting the highlight failed.
    #[error("failed to paint highlight: {0}")]
    Paint(String),

    /// The termination signal could not be awaited.
    #[error("failed to wait for termination signal: {0}")]
    Signal(String),

    /// The controller attempted an out-of-order transition.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl OverlayError {
    /// Returns `true` for errors caused by a missing display capability
    /// rather than a failed request.
    pub fn is_capability_error(&self) -> bool {
        matches!(self, OverlayError::NoArgbVisual)
    }
}

/// Window-system operations the overlay needs.
///
/// Implementors hand out guards; dropping a guard releases the resource.
/// `Monitor` and `Window` borrow the platform, `Surface` borrows the window
/// it draws on.
pub trait OverlayPlatform {
    /// A registered virtual monitor.  Dropping it unregisters the monitor.
    type Monitor<'p>
    where
        Self: 'p;

    /// A mapped overlay window.  Dropping it unmaps and destroys the window.
    type Window<'p>
    where
        Self: 'p;

    /// A drawing surface bound to a window.  Dropping it releases the
    /// drawing context and the surface.
    type Surface<'w>
    where
        Self: 'w;

    /// Registers `spec` as a virtual monitor.
    ///
    /// # Errors
    ///
    /// [`OverlayError::NoOutputs`] or [`OverlayError::NoPrimaryOutput`] when
    /// no output can back the monitor,
    /// [`OverlayError::MonitorRejected`] when the server refuses it.
    fn register_monitor(&self, spec: &MonitorSpec) -> Result<Self::Monitor<'_>, OverlayError>;

    /// Creates the overlay window over `region` and maps it.
    ///
    /// # Errors
    ///
    /// [`OverlayError::NoArgbVisual`] when the display lacks a 32-bit
    /// TrueColor visual, [`OverlayError::WindowCreation`] otherwise.
    fn show_window(&self, region: Region) -> Result<Self::Window<'_>, OverlayError>;

    /// Binds a drawing surface to `window`.
    ///
    /// # Errors
    ///
    /// [`OverlayError::Surface`] if the surface or context cannot be created.
    fn bind_surface<'w>(
        &'w self,
        window: &'w Self::Window<'_>,
    ) -> Result<Self::Surface<'w>, OverlayError>;

    /// Paints the highlight frame onto `surface` and pushes it to the screen.
    ///
    /// # Errors
    ///
    /// [`OverlayError::Paint`] if the drawing backend reports an error.
    fn paint(
        &self,
        surface: &mut Self::Surface<'_>,
        style: &HighlightStyle,
    ) -> Result<(), OverlayError>;
}
