//! Domain types owned by the overlay binary.

pub mod config;

pub use config::OverlayConfig;
