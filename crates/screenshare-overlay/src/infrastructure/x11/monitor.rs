//! RandR virtual monitor registration.
//!
//! # What is a RandR monitor? (for beginners)
//!
//! RandR 1.5 separates *outputs* (physical connectors such as `HDMI-1`) from
//! *monitors* (named rectangles of the screen that clients treat as
//! displays).  Normally every monitor is derived from an active output, but a
//! client may also define its own with `RRSetMonitor`.  That is what
//! `xrandr --setmonitor` does, and it is what [`VirtualMonitor::register`]
//! does: the new monitor borrows an existing output and covers exactly the
//! overlay's region.  Capture tools that list monitors then offer it.
//!
//! Registration is visible to every other client as soon as the server has
//! processed the request; there is no further handshake.

use std::os::raw::c_int;

use overlay_core::{choose_backing_output, MonitorSpec, Region};
use tracing::{debug, info, warn};
use x11::{xlib, xrandr};

use super::display::XDisplay;
use super::error_trap::ErrorTrap;
use crate::application::platform::OverlayError;

/// One entry of the server's monitor list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRecord {
    /// Monitor name (the atom's string).
    pub name: String,
    /// Geometry in root-window pixels.
    pub region: Region,
    /// Physical width in millimetres.
    pub mm_width: i32,
    /// Physical height in millimetres.
    pub mm_height: i32,
    /// Number of outputs backing the monitor.
    pub outputs: usize,
    /// Whether the monitor is the primary one.
    pub primary: bool,
}

/// Lists every monitor currently defined on the root window, including
/// inactive ones.
///
/// # Errors
///
/// Currently infallible; a null reply is treated as an empty list.
pub fn list_monitors(display: &XDisplay) -> Result<Vec<MonitorRecord>, OverlayError> {
    let mut count: c_int = 0;
    // SAFETY: valid display and root window; the returned array is freed
    // with XRRFreeMonitors below.
    let monitors =
        unsafe { xrandr::XRRGetMonitors(display.as_ptr(), display.root(), xlib::False, &mut count) };
    if monitors.is_null() {
        return Ok(Vec::new());
    }

    // SAFETY: Xlib returned `count` contiguous entries.
    let entries = unsafe { std::slice::from_raw_parts(monitors, count.max(0) as usize) };
    let records = entries
        .iter()
        .map(|m| MonitorRecord {
            name: display.atom_name(m.name).unwrap_or_default(),
            region: Region::new(m.width, m.height, m.x, m.y),
            mm_width: m.mwidth,
            mm_height: m.mheight,
            outputs: m.noutput.max(0) as usize,
            primary: m.primary != 0,
        })
        .collect();

    // SAFETY: `monitors` came from XRRGetMonitors and is not used afterwards.
    unsafe { xrandr::XRRFreeMonitors(monitors) };
    Ok(records)
}

/// Removes the monitor called `name`.
///
/// Does nothing if the name was never interned or no monitor with that name
/// exists; the server's `BadValue` for an unknown monitor is swallowed.
pub fn unregister_monitor(display: &XDisplay, name: &str) {
    let atom = match display.intern_atom(name, true) {
        Ok(Some(atom)) => atom,
        Ok(None) => {
            debug!(name, "monitor name was never interned; nothing to remove");
            return;
        }
        Err(e) => {
            debug!(name, "cannot look up monitor name: {e}");
            return;
        }
    };

    let trap = ErrorTrap::install(display);
    // SAFETY: valid display, root window and atom.
    unsafe { xrandr::XRRDeleteMonitor(display.as_ptr(), display.root(), atom) };
    match trap.finish() {
        None => info!(name, "virtual monitor removed"),
        Some(err) => debug!(name, "ignored error while removing monitor: {err}"),
    }
}

/// Maps the root window's outputs and primary output to the output the
/// monitor is bound to.
fn select_output(primary: u64, outputs: &[u64]) -> Result<u64, OverlayError> {
    if outputs.is_empty() {
        return Err(OverlayError::NoOutputs);
    }
    choose_backing_output(Some(primary), outputs).ok_or(OverlayError::NoPrimaryOutput)
}

/// Reads the output list and primary output of the root window.
fn backing_output(display: &XDisplay) -> Result<u64, OverlayError> {
    // SAFETY: valid display and root window; freed below.
    let resources = unsafe { xrandr::XRRGetScreenResources(display.as_ptr(), display.root()) };
    if resources.is_null() {
        return Err(OverlayError::NoOutputs);
    }

    // SAFETY: `resources` is non-null and owns `noutput` output ids.
    let outputs: Vec<u64> = unsafe {
        let res = &*resources;
        if res.outputs.is_null() || res.noutput <= 0 {
            Vec::new()
        } else {
            std::slice::from_raw_parts(res.outputs, res.noutput as usize)
                .iter()
                .map(|&o| o as u64)
                .collect()
        }
    };
    // SAFETY: not used after this point.
    unsafe { xrandr::XRRFreeScreenResources(resources) };

    // SAFETY: valid display and root window.
    let primary = unsafe { xrandr::XRRGetOutputPrimary(display.as_ptr(), display.root()) };

    select_output(primary as u64, &outputs)
}

/// A virtual monitor registered with RandR.  Dropping it removes the monitor.
pub struct VirtualMonitor<'d> {
    display: &'d XDisplay,
    name: String,
}

impl<'d> VirtualMonitor<'d> {
    /// Registers `spec` as a RandR monitor bound to the primary output.
    ///
    /// A monitor that already uses the same name is replaced; a warning is
    /// logged when that happens.
    ///
    /// # Errors
    ///
    /// - [`OverlayError::NoOutputs`] if the screen has no outputs.
    /// - [`OverlayError::NoPrimaryOutput`] if none of them is primary.
    /// - [`OverlayError::InvalidMonitorName`] if the name contains NUL.
    /// - [`OverlayError::MonitorRejected`] if the server answers
    ///   `RRSetMonitor` with an error.
    pub fn register(display: &'d XDisplay, spec: &MonitorSpec) -> Result<Self, OverlayError> {
        let output = backing_output(display)?;
        let atom = display
            .intern_atom(&spec.name, false)?
            .ok_or_else(|| OverlayError::InvalidMonitorName(spec.name.clone()))?;

        if let Some(existing) = list_monitors(display)?
            .into_iter()
            .find(|m| m.name == spec.name)
        {
            warn!(
                name = %spec.name,
                existing = %existing.region,
                "a monitor with this name already exists; replacing it"
            );
        }

        let mut outputs = [output as xrandr::RROutput];
        let mut info = xrandr::XRRMonitorInfo {
            name: atom,
            primary: xlib::False,
            automatic: xlib::False,
            noutput: outputs.len() as c_int,
            x: spec.region.x,
            y: spec.region.y,
            width: spec.region.width,
            height: spec.region.height,
            mwidth: spec.mm_width,
            mheight: spec.mm_height,
            outputs: outputs.as_mut_ptr(),
        };

        let trap = ErrorTrap::install(display);
        // SAFETY: valid display and root; `info` and `outputs` outlive the
        // call, and Xlib copies them into the request.
        unsafe { xrandr::XRRSetMonitor(display.as_ptr(), display.root(), &mut info) };
        if let Some(err) = trap.finish() {
            return Err(OverlayError::MonitorRejected {
                name: spec.name.clone(),
                detail: err.to_string(),
            });
        }

        info!(
            name = %spec.name,
            region = %spec.region,
            output,
            "virtual monitor registered"
        );
        Ok(Self {
            display,
            name: spec.name.clone(),
        })
    }
}

impl Drop for VirtualMonitor<'_> {
    fn drop(&mut self) {
        unregister_monitor(self.display, &self.name);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// The DISPLAY-gated tests need a live X server with RandR 1.5.  Without
// DISPLAY they do nothing.
