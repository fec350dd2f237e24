//! # overlay-core
//!
//! Domain types for the screenshare overlay.  This crate has zero
//! dependencies on X11, cairo or the async runtime; everything here can be
//! unit-tested on any machine.
//!
//! # What is the screenshare overlay? (for beginners)
//!
//! Screen-sharing tools usually let you share either a whole monitor or a
//! single window.  The overlay lets you share an arbitrary *rectangle*: it
//! registers that rectangle with the X server as a synthetic ("virtual")
//! monitor, so the sharing tool lists it next to the real monitors, and it
//! draws a translucent red frame around the rectangle so you can see what is
//! being shared.
//!
//! This crate defines:
//!
//! - **`domain::region`** – The rectangle supplied on the command line.
//! - **`domain::monitor`** – The virtual monitor descriptor derived from it.
//! - **`domain::highlight`** – The fixed look of the frame.
//! - **`domain::lifecycle`** – The forward-only state machine the controller
//!   walks through from start-up to termination.

pub mod domain;

pub use domain::highlight::HighlightStyle;
pub use domain::lifecycle::{LifecycleError, LifecycleState};
pub use domain::monitor::{choose_backing_output, MonitorSpec, DEFAULT_MONITOR_NAME};
pub use domain::region::Region;
