//! The Xlib display connection.
//!
//! [`XDisplay`] is the root of the ownership chain: every other X resource
//! borrows it, so the connection cannot be closed while a monitor, window or
//! surface is still alive.

use std::ffi::{CStr, CString};
use std::os::raw::c_int;
use std::ptr::NonNull;

use tracing::{debug, info};
use x11::xlib;

use crate::application::platform::OverlayError;

/// An open connection to the X server.
pub struct XDisplay {
    raw: NonNull<xlib::Display>,
    root: xlib::Window,
    screen: c_int,
}

impl XDisplay {
    /// Opens the display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::DisplayUnavailable`] if `XOpenDisplay` fails,
    /// e.g. because `DISPLAY` is unset or the server refuses the connection.
    pub fn open() -> Result<Self, OverlayError> {
        // SAFETY: a null name tells Xlib to use $DISPLAY.  The returned pointer
        // is owned by this struct and closed exactly once in Drop.
        let raw = NonNull::new(unsafe { xlib::XOpenDisplay(std::ptr::null()) }).ok_or_else(
            || {
                let display_env =
                    std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
                OverlayError::DisplayUnavailable(format!(
                    "XOpenDisplay failed; DISPLAY={display_env}"
                ))
            },
        )?;

        // SAFETY: `raw` is a valid display pointer.
        let (root, screen) = unsafe {
            (
                xlib::XDefaultRootWindow(raw.as_ptr()),
                xlib::XDefaultScreen(raw.as_ptr()),
            )
        };

        info!(root, screen, "connected to X display");
        Ok(Self { raw, root, screen })
    }

    /// The raw Xlib pointer, for FFI calls.
    pub fn as_ptr(&self) -> *mut xlib::Display {
        self.raw.as_ptr()
    }

    /// The root window of the default screen.
    pub fn root(&self) -> xlib::Window {
        self.root
    }

    /// The default screen number.
    pub fn screen(&self) -> c_int {
        self.screen
    }

    /// Sends buffered requests without waiting for replies.
    pub fn flush(&self) {
        // SAFETY: valid display pointer.
        unsafe { xlib::XFlush(self.as_ptr()) };
    }

    /// Sends buffered requests and waits until the server has processed them.
    pub fn sync(&self) {
        // SAFETY: valid display pointer.
        unsafe { xlib::XSync(self.as_ptr(), xlib::False) };
    }

    /// Resolves `name` to an atom.
    ///
    /// With `only_if_exists` the atom is looked up but never created, and
    /// `Ok(None)` means the server has never heard of the name.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidMonitorName`] if `name` contains a NUL
    /// byte.
    pub fn intern_atom(
        &self,
        name: &str,
        only_if_exists: bool,
    ) -> Result<Option<xlib::Atom>, OverlayError> {
        let c_name =
            CString::new(name).map_err(|_| OverlayError::InvalidMonitorName(name.to_string()))?;
        let flag = if only_if_exists {
            xlib::True
        } else {
            xlib::False
        };

        // SAFETY: valid display pointer and NUL-terminated name.
        let atom = unsafe { xlib::XInternAtom(self.as_ptr(), c_name.as_ptr(), flag) };
        Ok((atom != 0).then_some(atom))
    }

    /// Returns the string an atom stands for.
    pub fn atom_name(&self, atom: xlib::Atom) -> Option<String> {
        // SAFETY: valid display pointer.  The returned string is Xlib-owned
        // and must be released with XFree.
        unsafe {
            let ptr = xlib::XGetAtomName(self.as_ptr(), atom);
            if ptr.is_null() {
                return None;
            }
            let name = CStr::from_ptr(ptr).to_string_lossy().into_owned();
            xlib::XFree(ptr.cast());
            Some(name)
        }
    }
}

impl Drop for XDisplay {
    fn drop(&mut self) {
        debug!("closing X display");
        // SAFETY: the pointer came from XOpenDisplay and every resource that
        // borrowed this struct has already been dropped.
        unsafe { xlib::XCloseDisplay(self.as_ptr()) };
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
