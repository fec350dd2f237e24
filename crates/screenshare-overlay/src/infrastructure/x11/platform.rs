//! [`OverlayPlatform`] backed by a real X server.

use overlay_core::{HighlightStyle, MonitorSpec, Region};

use super::display::XDisplay;
use super::monitor::VirtualMonitor;
use super::surface::HighlightSurface;
use super::window::OverlayWindow;
use crate::application::platform::{OverlayError, OverlayPlatform};

/// The X11 platform.  Owns the display connection; dropping it closes the
/// connection, which the borrow checker only allows once every monitor,
/// window and surface handed out has been dropped.
pub struct X11Platform {
    display: XDisplay,
}

impl X11Platform {
    /// Connects to the display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::DisplayUnavailable`] if no display is reachable.
    pub fn open() -> Result<Self, OverlayError> {
        Ok(Self {
            display: XDisplay::open()?,
        })
    }
}

impl OverlayPlatform for X11Platform {
    type Monitor<'p> = VirtualMonitor<'p> where Self: 'p;
    type Window<'p> = OverlayWindow<'p> where Self: 'p;
    type Surface<'w> = HighlightSurface<'w> where Self: 'w;

    fn register_monitor(&self, spec: &MonitorSpec) -> Result<VirtualMonitor<'_>, OverlayError> {
        VirtualMonitor::register(&self.display, spec)
    }

    fn show_window(&self, region: Region) -> Result<OverlayWindow<'_>, OverlayError> {
        OverlayWindow::create(&self.display, region)
    }

    fn bind_surface<'w>(
        &'w self,
        window: &'w OverlayWindow<'_>,
    ) -> Result<HighlightSurface<'w>, OverlayError> {
        HighlightSurface::bind(window)
    }

    fn paint(
        &self,
        surface: &mut HighlightSurface<'_>,
        style: &HighlightStyle,
    ) -> Result<(), OverlayError> {
        surface.paint(style)?;
        self.display.flush();
        Ok(())
    }
}
