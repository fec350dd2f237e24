//! Turning asynchronous X protocol errors into `Result`s.
//!
//! Xlib reports protocol errors (e.g. `BadValue` from `RRSetMonitor`) through
//! a process-wide callback, and the default callback prints the error and
//! exits the process.  An [`ErrorTrap`] swaps in a recording callback for the
//! duration of one or more requests, syncs with the server and hands back
//! whatever error arrived.
//!
//! The handler is process-global, so traps are serialised with a mutex and
//! only errors from the trapping connection are recorded.

use std::ffi::CStr;
use std::fmt;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

use x11::xlib;

use super::display::XDisplay;

static TRAP_LOCK: Mutex<()> = Mutex::new(());

/// Connection the active trap belongs to; null when no trap is installed.
static TRAPPED_DISPLAY: AtomicPtr<xlib::Display> = AtomicPtr::new(ptr::null_mut());

static ERROR_CODE: AtomicU8 = AtomicU8::new(0);
static REQUEST_CODE: AtomicU8 = AtomicU8::new(0);
static MINOR_CODE: AtomicU8 = AtomicU8::new(0);

/// An X protocol error captured by an [`ErrorTrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XProtocolError {
    /// Error code, e.g. 2 for `BadValue`.
    pub error_code: u8,
    /// Major opcode of the failed request.
    pub request_code: u8,
    /// Minor opcode (the RandR sub-request for extension errors).
    pub minor_code: u8,
    /// Server-provided description of `error_code`.
    pub description: String,
}

impl fmt::Display for XProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (error {}, request {}.{})",
            self.description, self.error_code, self.request_code, self.minor_code
        )
    }
}

/// Records the first error the trapping connection receives.  Errors for
/// other connections are ignored.
unsafe extern "C" fn record_error(
    display: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> c_int {
    if display.is_null() || display != TRAPPED_DISPLAY.load(Ordering::SeqCst) {
        return 0;
    }
    if !event.is_null() && ERROR_CODE.load(Ordering::SeqCst) == 0 {
        let event = &*event;
        REQUEST_CODE.store(event.request_code, Ordering::SeqCst);
        MINOR_CODE.store(event.minor_code, Ordering::SeqCst);
        ERROR_CODE.store(event.error_code, Ordering::SeqCst);
    }
    0
}

/// Captures X protocol errors raised between [`ErrorTrap::install`] and
/// [`ErrorTrap::finish`].  Dropping the trap restores the previous handler.
pub struct ErrorTrap<'d> {
    display: &'d XDisplay,
    previous: Option<unsafe extern "C" fn(*mut xlib::Display, *mut xlib::XErrorEvent) -> std::os::raw::c_int>,
    _serial: MutexGuard<'static, ()>,
}

impl<'d> ErrorTrap<'d> {
    /// Flushes earlier requests, then starts recording errors.
    pub fn install(display: &'d XDisplay) -> Self {
        let serial = TRAP_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        // Errors from requests issued before the trap must not be blamed on
        // the trapped ones.
        display.sync();
        ERROR_CODE.store(0, Ordering::SeqCst);
        TRAPPED_DISPLAY.store(display.as_ptr(), Ordering::SeqCst);

        // SAFETY: `record_error` matches the XErrorHandler signature and only
        // touches atomics.
        let previous = unsafe { xlib::XSetErrorHandler(Some(record_error)) };
        Self {
            display,
            previous,
            _serial: serial,
        }
    }

    /// Waits for the server to process every trapped request and returns the
    /// first error it reported, if any.
    pub fn finish(self) -> Option<XProtocolError> {
        self.display.sync();
        let code = ERROR_CODE.swap(0, Ordering::SeqCst);
        if code == 0 {
            return None;
        }
        Some(XProtocolError {
            error_code: code,
            request_code: REQUEST_CODE.load(Ordering::SeqCst),
            minor_code: MINOR_CODE.load(Ordering::SeqCst),
            description: error_text(self.display, code),
        })
    }
}

impl Drop for ErrorTrap<'_> {
    fn drop(&mut self) {
        // SAFETY: restores the handler that was active before install().
        unsafe { xlib::XSetErrorHandler(self.previous) };
        TRAPPED_DISPLAY.store(ptr::null_mut(), Ordering::SeqCst);
    }
}

fn error_text(display: &XDisplay, code: u8) -> String {
    let mut buf = [0 as c_char; 128];
    // SAFETY: valid display pointer; Xlib writes at most `buf.len()` bytes
    // including the terminating NUL.
    unsafe {
        xlib::XGetErrorText(
            display.as_ptr(),
            c_int::from(code),
            buf.as_mut_ptr(),
            buf.len() as c_int,
        );
        CStr::from_ptr(buf.as_ptr()).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display_includes_codes() {
        let err = XProtocolError {
            error_code: 2,
            request_code: 140,
            minor_code: 43,
            description: "BadValue".to_string(),
        };
        assert_eq!(err.to_string(), "BadValue (error 2, request 140.43)");
    }

    fn error_event(error_code: u8) -> xlib::XErrorEvent {
        // SAFETY: all-zero is a valid XErrorEvent.
        let mut event: xlib::XErrorEvent = unsafe { std::mem::zeroed() };
        event.error_code = error_code;
        event.request_code = 140;
        event
    }

    #[test]
    fn test_record_error_ignores_other_connections() {
        // Arrange: pretend a trap is active on connection `ours`
        let _serial = TRAP_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let ours = 0x1000 as *mut xlib::Display;
        let other = 0x2000 as *mut xlib::Display;
        TRAPPED_DISPLAY.store(ours, Ordering::SeqCst);
        ERROR_CODE.store(0, Ordering::SeqCst);

        // Act
        let mut foreign = error_event(xlib::BadWindow);
        // SAFETY: the handler only compares the display pointer and reads
        // the event.
        unsafe { record_error(other, &mut foreign) };
        let after_foreign = ERROR_CODE.load(Ordering::SeqCst);

        let mut own = error_event(xlib::BadValue);
        // SAFETY: as above.
        unsafe { record_error(ours, &mut own) };
        let after_own = ERROR_CODE.swap(0, Ordering::SeqCst);
        TRAPPED_DISPLAY.store(ptr::null_mut(), Ordering::SeqCst);

        // Assert
        assert_eq!(after_foreign, 0);
        assert_eq!(after_own, xlib::BadValue);
    }

    #[test]
    fn test_trap_ignores_error_on_second_connection_when_display_available() {
        let (Ok(ours), Ok(other)) = (XDisplay::open(), XDisplay::open()) else {
            return;
        };
        // Arrange
        let trap = ErrorTrap::install(&ours);

        // Act: the failing request goes out on the other connection
        // SAFETY: valid display pointer; the bogus id only yields BadWindow.
        unsafe { xlib::XUnmapWindow(other.as_ptr(), 0x7fff_fff0) };
        other.sync();

        // Assert
        assert_eq!(trap.finish(), None);
    }

    #[test]
    fn test_trap_reports_bad_window_when_display_available() {
        if let Ok(display) = XDisplay::open() {
            // Arrange
            let trap = ErrorTrap::install(&display);

            // Act: unmapping a window id that was never created
            // SAFETY: valid display pointer; the bogus id only yields BadWindow.
            unsafe { xlib::XUnmapWindow(display.as_ptr(), 0x7fff_fff0) };
            let err = trap.finish();

            // Assert
            assert_eq!(err.map(|e| e.error_code), Some(xlib::BadWindow as u8));
        }
    }

    #[test]
    fn test_trap_is_clean_without_requests_when_display_available() {
        if let Ok(display) = XDisplay::open() {
            let trap = ErrorTrap::install(&display);
            assert_eq!(trap.finish(), None);
        }
    }
}
