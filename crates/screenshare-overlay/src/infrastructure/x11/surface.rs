//! Painting the highlight frame with cairo.
//!
//! [`HighlightSurface`] binds a cairo Xlib surface to the overlay window and
//! keeps a drawing context on it.  The frame is drawn once; there is no
//! redraw loop, so if the compositor discards the window contents they stay
//! gone.
//!
//! [`paint_highlight`] is independent of Xlib and works on any cairo
//! context, which is how the tests check its pixels (on an image surface).

use std::marker::PhantomData;

use cairo::{Context, Operator, XlibSurface};
use overlay_core::HighlightStyle;
use tracing::debug;

use super::window::OverlayWindow;
use crate::application::platform::OverlayError;

/// Strokes the outline of a `width` x `height` rectangle at the origin.
///
/// The stroke is centred on the rectangle's edges, so with a line width of
/// 10 a 5-pixel band is visible inside the surface.  The `Source` operator
/// replaces the band's pixels instead of blending into them, which makes a
/// repeated call produce the same pixels as a single one.
///
/// # Errors
///
/// Returns the cairo error status if stroking fails.
pub fn paint_highlight(
    cr: &Context,
    width: f64,
    height: f64,
    style: &HighlightStyle,
) -> Result<(), cairo::Error> {
    cr.set_operator(Operator::Source);
    cr.set_source_rgba(style.red, style.green, style.blue, style.alpha);
    cr.rectangle(0.0, 0.0, width, height);
    cr.set_line_width(style.line_width);
    cr.stroke()
}

/// A cairo surface and context bound to an [`OverlayWindow`].
///
/// Dropping it destroys the context, then finishes and destroys the surface.
/// It borrows the window, so it is always released before the window is.
pub struct HighlightSurface<'w> {
    context: Option<Context>,
    surface: XlibSurface,
    width: i32,
    height: i32,
    _window: PhantomData<&'w ()>,
}

impl<'w> HighlightSurface<'w> {
    /// Creates a cairo surface targeting `window` and a context on it.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Surface`] if cairo cannot create either.
    pub fn bind(window: &'w OverlayWindow<'_>) -> Result<Self, OverlayError> {
        let region = window.region();
        // SAFETY: display, drawable and visual all belong to `window`, which
        // outlives this surface.
        let surface = unsafe {
            XlibSurface::create(
                window.display().as_ptr(),
                window.id(),
                window.visual(),
                region.width,
                region.height,
            )
        }
        .map_err(|e| OverlayError::Surface(e.to_string()))?;
        let context = Context::new(&surface).map_err(|e| OverlayError::Surface(e.to_string()))?;

        debug!(window = window.id(), "cairo surface bound");
        Ok(Self {
            context: Some(context),
            surface,
            width: region.width,
            height: region.height,
            _window: PhantomData,
        })
    }

    /// Paints the frame and flushes it to the window.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Paint`] if cairo reports an error.
    pub fn paint(&mut self, style: &HighlightStyle) -> Result<(), OverlayError> {
        let cr = self
            .context
            .as_ref()
            .ok_or_else(|| OverlayError::Paint("drawing context already released".to_string()))?;
        paint_highlight(cr, f64::from(self.width), f64::from(self.height), style)
            .map_err(|e| OverlayError::Paint(e.to_string()))?;
        self.surface.flush();
        Ok(())
    }
}

impl Drop for HighlightSurface<'_> {
    fn drop(&mut self) {
        drop(self.context.take());
        self.surface.finish();
        debug!("cairo surface released");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};

    const W: i32 = 40;
    const H: i32 = 30;

    /// Paints `times` times onto a fresh transparent image and returns its
    /// bytes and stride.
    fn render(times: usize) -> (Vec<u8>, usize) {
        let mut surface = ImageSurface::create(Format::ARgb32, W, H).expect("surface");
        {
            let cr = Context::new(&surface).expect("context");
            for _ in 0..times {
                paint_highlight(&cr, f64::from(W), f64::from(H), &HighlightStyle::SCREENSHARE)
                    .expect("paint");
            }
        }
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().expect("exclusive access").to_vec();
        (data, stride)
    }

    /// Reads the premultiplied ARGB32 pixel at (x, y).
    fn pixel(data: &[u8], stride: usize, x: usize, y: usize) -> u32 {
        let off = y * stride + x * 4;
        u32::from_ne_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
    }

    #[test]
    fn test_paint_twice_equals_paint_once() {
        // Arrange / Act
        let (once, _) = render(1);
        let (twice, _) = render(2);

        // Assert
        assert_eq!(once, twice);
    }

    #[test]
    fn test_border_band_is_translucent_red() {
        // Act
        let (data, stride) = render(1);
        let px = pixel(&data, stride, 2, (H / 2) as usize);

        // Assert: premultiplied, so red equals alpha at full intensity
        let a = px >> 24;
        let r = (px >> 16) & 0xff;
        let g = (px >> 8) & 0xff;
        let b = px & 0xff;
        assert!((127..=128).contains(&a), "alpha was {a}");
        assert_eq!(r, a);
        assert_eq!((g, b), (0, 0));
    }

    #[test]
    fn test_interior_stays_transparent() {
        let (data, stride) = render(1);
        assert_eq!(pixel(&data, stride, (W / 2) as usize, (H / 2) as usize), 0);
        // First pixel past the 5-pixel band
        assert_eq!(pixel(&data, stride, 5, (H / 2) as usize), 0);
    }

    #[test]
    fn test_all_four_edges_are_stroked() {
        let (data, stride) = render(1);
        let (w, h) = (W as usize, H as usize);
        for (x, y) in [(0, h / 2), (w - 1, h / 2), (w / 2, 0), (w / 2, h - 1)] {
            assert_ne!(pixel(&data, stride, x, y), 0, "edge pixel ({x}, {y})");
        }
    }
}
