//! Overlay configuration.
//!
//! [`OverlayConfig`] is the single source of truth for one run of the
//! overlay.  It is built once from the command line and never changes; the
//! overlay has no reconfiguration while running.
//!
//! Keeping it a plain struct (no environment reads inside) lets tests build
//! one directly.

use overlay_core::{HighlightStyle, MonitorSpec, Region, DEFAULT_MONITOR_NAME};

/// All runtime settings for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// The screen rectangle to highlight and share.
    pub region: Region,
    /// Name the virtual monitor is registered under.
    pub monitor_name: String,
    /// Look of the highlight frame.
    pub style: HighlightStyle,
}

impl OverlayConfig {
    /// Creates a config for `region` with the default monitor name and style.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            monitor_name: DEFAULT_MONITOR_NAME.to_string(),
            style: HighlightStyle::default(),
        }
    }

    /// Replaces the monitor name.
    pub fn with_monitor_name(mut self, name: impl Into<String>) -> Self {
        self.monitor_name = name.into();
        self
    }

    /// Describes the virtual monitor this config registers.
    pub fn monitor_spec(&self) -> MonitorSpec {
        MonitorSpec::for_region(self.monitor_name.clone(), self.region)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_screenshare_name_and_default_style() {
        // Arrange / Act
        let cfg = OverlayConfig::new(Region::new(400, 300, 100, 50));

        // Assert
        assert_eq!(cfg.monitor_name, "screenshare");
        assert_eq!(cfg.style, HighlightStyle::SCREENSHARE);
    }

    #[test]
    fn test_with_monitor_name_overrides_name_only() {
        let region = Region::new(400, 300, 100, 50);
        let cfg = OverlayConfig::new(region).with_monitor_name("demo");
        assert_eq!(cfg.monitor_name, "demo");
        assert_eq!(cfg.region, region);
    }

    #[test]
    fn test_monitor_spec_matches_region() {
        let region = Region::new(400, 300, 100, 50);
        let spec = OverlayConfig::new(region).monitor_spec();
        assert_eq!(spec.name, "screenshare");
        assert_eq!(spec.region, region);
        assert_eq!((spec.mm_width, spec.mm_height), (400, 300));
    }
}
