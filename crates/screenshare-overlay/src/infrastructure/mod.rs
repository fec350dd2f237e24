//! Infrastructure layer for the overlay.
//!
//! Contains OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain` and
//! `overlay_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`x11`** – Xlib + RandR + cairo implementation of `OverlayPlatform`.
//!   Linux only.
//! - **`mock`** – In-memory `OverlayPlatform` that records what happened.
//!   Always compiled so tests run without a display.
//! - **`signal`** – The shutdown future (SIGINT or SIGTERM).
//! - **`console`** – The `LifecycleObserver` used by the binary: fixed
//!   stdout messages plus structured logs.

pub mod console;
pub mod mock;
pub mod signal;

#[cfg(target_os = "linux")]
pub mod x11;
