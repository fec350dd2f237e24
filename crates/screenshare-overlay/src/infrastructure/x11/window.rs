//! The override-redirect ARGB overlay window.
//!
//! Two properties turn an ordinary X window into a passive highlight:
//!
//! - **override-redirect** – the window manager neither places, decorates
//!   nor focuses it, so it appears exactly at the requested geometry above
//!   normal windows.
//! - **a depth-32 TrueColor visual** – every pixel carries an alpha channel,
//!   so a compositing manager blends the window with what is underneath.
//!   The background pixel is 0 (fully transparent); only what cairo paints
//!   is visible.

use std::mem::MaybeUninit;
use std::os::raw::{c_int, c_uint};

use overlay_core::Region;
use tracing::{debug, info};
use x11::xlib;

use super::display::XDisplay;
use super::error_trap::ErrorTrap;
use crate::application::platform::OverlayError;

/// Bit depth required for per-pixel alpha.
pub const ARGB_DEPTH: c_int = 32;

/// Server-side state of the overlay window, for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Geometry reported by the server.
    pub region: Region,
    /// Window depth.
    pub depth: i32,
    /// Whether the window bypasses the window manager.
    pub override_redirect: bool,
    /// Whether the window is mapped and all its ancestors are mapped.
    pub viewable: bool,
}

/// A mapped overlay window.  Dropping it unmaps and destroys the window and
/// frees its colormap.
pub struct OverlayWindow<'d> {
    display: &'d XDisplay,
    window: xlib::Window,
    colormap: xlib::Colormap,
    visual: *mut xlib::Visual,
    visual_class: c_int,
    region: Region,
}

impl<'d> OverlayWindow<'d> {
    /// Creates the overlay window over `region` and maps it.
    ///
    /// # Errors
    ///
    /// - [`OverlayError::NoArgbVisual`] if the default screen has no 32-bit
    ///   TrueColor visual.  This is a property of the display, not a
    ///   transient failure.
    /// - [`OverlayError::WindowCreation`] if the server rejects the window.
    pub fn create(display: &'d XDisplay, region: Region) -> Result<Self, OverlayError> {
        let dpy = display.as_ptr();

        let mut vinfo = MaybeUninit::<xlib::XVisualInfo>::zeroed();
        // SAFETY: valid display; `vinfo` is written on success.
        let found = unsafe {
            xlib::XMatchVisualInfo(
                dpy,
                display.screen(),
                ARGB_DEPTH,
                xlib::TrueColor,
                vinfo.as_mut_ptr(),
            )
        };
        if found == 0 {
            return Err(OverlayError::NoArgbVisual);
        }
        // SAFETY: XMatchVisualInfo returned non-zero, so `vinfo` is filled in.
        let vinfo = unsafe { vinfo.assume_init() };
        debug!(visual_id = vinfo.visualid, depth = vinfo.depth, "matched ARGB visual");

        let colormap = create_colormap(display, vinfo.visual)?;

        // SAFETY: all-zero is a valid XSetWindowAttributes; only the fields
        // named in the value mask are read.
        let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
        attrs.override_redirect = xlib::True;
        attrs.colormap = colormap;
        attrs.background_pixel = 0;
        attrs.border_pixel = 0;
        let mask =
            xlib::CWOverrideRedirect | xlib::CWColormap | xlib::CWBackPixel | xlib::CWBorderPixel;

        let trap = ErrorTrap::install(display);
        // SAFETY: valid display, parent, visual and attributes.
        let window = unsafe {
            xlib::XCreateWindow(
                dpy,
                display.root(),
                region.x,
                region.y,
                region.width_u32(),
                region.height_u32(),
                0,
                vinfo.depth,
                xlib::InputOutput as c_uint,
                vinfo.visual,
                mask,
                &mut attrs,
            )
        };
        if let Some(err) = trap.finish() {
            // SAFETY: the colormap was created above and nothing uses it.
            unsafe { xlib::XFreeColormap(dpy, colormap) };
            return Err(OverlayError::WindowCreation(err.to_string()));
        }

        // SAFETY: `window` was just created on this display.
        unsafe { xlib::XMapWindow(dpy, window) };
        display.flush();

        info!(window, region = %region, "overlay window mapped");
        Ok(Self {
            display,
            window,
            colormap,
            visual: vinfo.visual,
            visual_class: vinfo.class,
            region,
        })
    }

    /// The display this window lives on.
    pub fn display(&self) -> &'d XDisplay {
        self.display
    }

    /// The X window id.
    pub fn id(&self) -> xlib::Window {
        self.window
    }

    /// The ARGB visual the window was created with.
    pub fn visual(&self) -> *mut xlib::Visual {
        self.visual
    }

    /// Class of the window's visual (`TrueColor` for a correctly created
    /// overlay).
    pub fn visual_class(&self) -> c_int {
        self.visual_class
    }

    /// The region the window was requested at.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Queries the server for the window's current geometry and attributes.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::WindowCreation`] if the server no longer
    /// knows the window.
    pub fn state(&self) -> Result<WindowState, OverlayError> {
        let dpy = self.display.as_ptr();
        let mut attrs = MaybeUninit::<xlib::XWindowAttributes>::zeroed();
        // SAFETY: valid display and window; `attrs` is written on success.
        let ok = unsafe { xlib::XGetWindowAttributes(dpy, self.window, attrs.as_mut_ptr()) };
        if ok == 0 {
            return Err(OverlayError::WindowCreation(format!(
                "XGetWindowAttributes failed for window {:#x}",
                self.window
            )));
        }
        // SAFETY: the call succeeded, so `attrs` is filled in.
        let attrs = unsafe { attrs.assume_init() };

        Ok(WindowState {
            region: Region::new(attrs.width, attrs.height, attrs.x, attrs.y),
            depth: attrs.depth,
            override_redirect: attrs.override_redirect != 0,
            viewable: attrs.map_state == xlib::IsViewable,
        })
    }
}

impl Drop for OverlayWindow<'_> {
    fn drop(&mut self) {
        let dpy = self.display.as_ptr();
        // SAFETY: window and colormap were created on this display and the
        // surface bound to the window has already been released.
        unsafe {
            xlib::XUnmapWindow(dpy, self.window);
            xlib::XDestroyWindow(dpy, self.window);
            xlib::XFreeColormap(dpy, self.colormap);
        }
        self.display.flush();
        debug!(window = self.window, "overlay window destroyed");
    }
}

/// Allocates a colormap for `visual` on the root window.
///
/// # Errors
///
/// Returns [`OverlayError::WindowCreation`] if the server rejects the
/// colormap (e.g. `BadMatch` for a visual the screen does not support).
fn create_colormap(
    display: &XDisplay,
    visual: *mut xlib::Visual,
) -> Result<xlib::Colormap, OverlayError> {
    let trap = ErrorTrap::install(display);
    // SAFETY: valid display and root window; `visual` points at a live
    // Visual for the duration of the call.
    let colormap =
        unsafe { xlib::XCreateColormap(display.as_ptr(), display.root(), visual, xlib::AllocNone) };
    match trap.finish() {
        None => Ok(colormap),
        Some(err) => Err(OverlayError::WindowCreation(format!("colormap: {err}"))),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
