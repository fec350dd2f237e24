//! screenshare-overlay library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the overlay do? (for beginners)
//!
//! Given a rectangle on the screen, the overlay:
//!
//! 1. Registers the rectangle with the X server as a RandR virtual monitor,
//!    so screen-sharing tools offer it as a capture source.
//! 2. Opens a borderless, override-redirect, 32-bit ARGB window over the
//!    rectangle.
//! 3. Paints a translucent red frame into that window with cairo.
//! 4. Waits for SIGINT (or SIGTERM).
//! 5. Tears everything down in reverse order and exits.
//!
//! The ordering of those steps, and what happens when one of them fails, is
//! handled by [`application::run_overlay`].  The X11 specifics live behind
//! the [`application::platform::OverlayPlatform`] trait.

/// Domain layer: runtime configuration.
pub mod domain;

/// Application layer: the lifecycle controller and its platform seam.
pub mod application;

/// Infrastructure layer: X11/RandR/cairo adapters, signals, console output.
pub mod infrastructure;
