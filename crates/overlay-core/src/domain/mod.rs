//! Domain entities for the overlay.
//!
//! Pure data and rules with no OS dependencies.

pub mod highlight;
pub mod lifecycle;
pub mod monitor;
pub mod region;
