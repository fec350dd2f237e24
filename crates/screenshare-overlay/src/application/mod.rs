//! Application layer for the overlay.
//!
//! - **`platform`** – The [`platform::OverlayPlatform`] trait: the three
//!   resources the overlay needs (virtual monitor, window, drawing surface)
//!   expressed as guard types whose `Drop` releases them.  The X11
//!   implementation lives in `infrastructure::x11`; a recording mock lives in
//!   `infrastructure::mock`.
//!
//! - **`run_overlay`** – The lifecycle controller.  It creates the resources
//!   in dependency order, waits for shutdown, and releases them in reverse.

pub mod platform;
pub mod run_overlay;

pub use platform::{OverlayError, OverlayPlatform};
pub use run_overlay::{run_overlay, LifecycleObserver};
