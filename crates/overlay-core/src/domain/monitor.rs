//! Virtual monitor descriptor.
//!
//! A virtual monitor is a RandR monitor record that is not backed by its own
//! CRTC.  It borrows one real output and claims a sub-rectangle of the
//! screen, which is enough for capture tools to list it as a selectable
//! display.
//!
//! [`MonitorSpec`] is the platform-neutral description of that record; the
//! X11 layer turns it into an `XRRMonitorInfo`.

use crate::domain::region::Region;

/// Name the monitor is registered under unless overridden on the command line.
///
/// Capture tools show this string in their monitor picker.
pub const DEFAULT_MONITOR_NAME: &str = "screenshare";

/// Description of the synthetic monitor to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSpec {
    /// Name the monitor is registered under (becomes an X atom).
    pub name: String,
    /// Position and size in root-window pixels.
    pub region: Region,
    /// Reported physical width in millimetres.
    pub mm_width: i32,
    /// Reported physical height in millimetres.
    pub mm_height: i32,
}

impl MonitorSpec {
    /// Builds the descriptor for `region` under `name`.
    ///
    /// The physical size is set equal to the pixel size so consumers compute
    /// a 1:1 aspect ratio and a DPI of 25.4.
    pub fn for_region(name: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            region,
            mm_width: region.width,
            mm_height: region.height,
        }
    }
}

/// Picks the output a virtual monitor is bound to.
///
/// `primary` is the server's primary output (`None` or XID 0 when unset).
/// Only the primary output is ever used; returns `None` when the screen has
/// no outputs or none of them is designated primary.
pub fn choose_backing_output(primary: Option<u64>, outputs: &[u64]) -> Option<u64> {
    if outputs.is_empty() {
        return None;
    }
    primary.filter(|&id| id != 0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_region_copies_geometry() {
        // Arrange
        let region = Region::new(400, 300, 100, 50);

        // Act
        let spec = MonitorSpec::for_region(DEFAULT_MONITOR_NAME, region);

        // Assert
        assert_eq!(spec.name, "screenshare");
        assert_eq!(spec.region, region);
    }

    #[test]
    fn test_for_region_sets_physical_size_equal_to_pixels() {
        let spec = MonitorSpec::for_region("x", Region::new(1280, 720, 0, 0));
        assert_eq!(spec.mm_width, 1280);
        assert_eq!(spec.mm_height, 720);
    }

    #[test]
    fn test_choose_backing_output_binds_primary() {
        // Arrange: primary is the second listed output
        let outputs = [0x41, 0x42, 0x43];

        // Act
        let chosen = choose_backing_output(Some(0x42), &outputs);

        // Assert
        assert_eq!(chosen, Some(0x42));
    }

    #[test]
    fn test_choose_backing_output_ignores_first_listed_without_primary() {
        let outputs = [0x41, 0x42];
        assert_eq!(choose_backing_output(Some(0), &outputs), None);
        assert_eq!(choose_backing_output(None, &outputs), None);
    }

    #[test]
    fn test_choose_backing_output_none_without_outputs() {
        assert_eq!(choose_backing_output(Some(0x42), &[]), None);
    }
}
