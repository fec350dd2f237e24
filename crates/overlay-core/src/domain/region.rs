//! The screen rectangle the overlay covers.
//!
//! A [`Region`] is supplied once at start-up (from four positional CLI
//! arguments) and never changes afterwards.  Values are deliberately not
//! range-checked: zero or negative sizes are handed to the X server as-is and
//! whatever it does with them is the result.

use std::fmt;

/// A rectangle in root-window pixel coordinates.
///
/// `x` and `y` are the top-left corner; `width` and `height` extend right and
/// down from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
}

impl Region {
    /// Creates a region from its size and position, in CLI argument order.
    pub const fn new(width: i32, height: i32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Width as the unsigned value Xlib expects for window sizes.
    ///
    /// Negative widths wrap, exactly as a C caller passing an `int` to an
    /// `unsigned int` parameter would.
    pub fn width_u32(&self) -> u32 {
        self.width as u32
    }

    /// Height as the unsigned value Xlib expects for window sizes.
    pub fn height_u32(&self) -> u32 {
        self.height as u32
    }
}

impl fmt::Display for Region {
    /// Formats the region in X geometry notation, e.g. `400x300+100+50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
