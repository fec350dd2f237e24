//! Appearance of the highlight frame.

/// Colour and stroke of the frame painted around the shared region.
///
/// Channels are in `0.0..=1.0`, matching cairo's `set_source_rgba`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
    /// Stroke width in pixels.  The stroke is centred on the window edge, so
    /// half of it is visible inside the window.
    pub line_width: f64,
}

impl HighlightStyle {
    /// The frame used by the overlay: half-transparent red, 10 pixels wide.
    pub const SCREENSHARE: HighlightStyle = HighlightStyle {
        red: 1.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.5,
        line_width: 10.0,
    };
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::SCREENSHARE
    }
}
