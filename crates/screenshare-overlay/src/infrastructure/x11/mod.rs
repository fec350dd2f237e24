//! X11 implementation of the overlay platform.
//!
//! | Module       | X API used                                             |
//! |--------------|--------------------------------------------------------|
//! | `display`    | `XOpenDisplay`, `XDefaultRootWindow`, `XCloseDisplay`  |
//! | `error_trap` | `XSetErrorHandler` + `XSync`                           |
//! | `monitor`    | `XRRGetScreenResources`, `XRRSetMonitor`, `XRRDeleteMonitor` |
//! | `window`     | `XMatchVisualInfo`, `XCreateColormap`, `XCreateWindow` |
//! | `surface`    | `cairo_xlib_surface_create`, `cairo_create`            |
//! | `platform`   | ties the above into `OverlayPlatform`                  |
//!
//! All of these types hold raw Xlib pointers and are neither `Send` nor
//! `Sync`; the overlay runs on a single thread.

pub mod display;
pub mod error_trap;
pub mod monitor;
pub mod platform;
pub mod surface;
pub mod window;

pub use display::XDisplay;
pub use monitor::{list_monitors, unregister_monitor, MonitorRecord, VirtualMonitor};
pub use platform::X11Platform;
pub use surface::{paint_highlight, HighlightSurface};
pub use window::{OverlayWindow, WindowState};
