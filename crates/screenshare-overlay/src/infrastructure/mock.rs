//! Mock overlay platform for unit testing.
//!
//! # Why a mock platform?
//!
//! The real platform needs a running X server with RandR and a 32-bit
//! visual, and it changes what other programs on that server see.  The
//! `MockPlatform` replaces every call with in-memory bookkeeping:
//!
//! - Each acquire and release is pushed onto an event log, so tests can
//!   assert the exact order.
//! - Registered monitors are kept in a list that behaves like the server's
//!   monitor list (same-name registration replaces, unknown-name removal is a
//!   no-op).
//!
//! # `failing_at`
//!
//! Build the mock with [`MockPlatform::failing_at`] to make one step fail
//! with the error the real platform would raise there.

use std::sync::Mutex;

use overlay_core::{HighlightStyle, MonitorSpec, Region};

use crate::application::platform::{OverlayError, OverlayPlatform};

/// One observable platform action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    MonitorRegistered,
    MonitorUnregistered,
    WindowShown,
    WindowDestroyed,
    SurfaceBound,
    Painted,
    SurfaceReleased,
}

/// The step at which a [`MockPlatform`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    /// `register_monitor` fails with [`OverlayError::NoOutputs`].
    RegisterMonitor,
    /// `show_window` fails with [`OverlayError::NoArgbVisual`].
    ShowWindow,
    /// `bind_surface` fails with [`OverlayError::Surface`].
    BindSurface,
    /// `paint` fails with [`OverlayError::Paint`].
    Paint,
}

/// A platform that records calls instead of talking to a display server.
#[derive(Debug, Default)]
pub struct MockPlatform {
    /// Every acquire/release in the order it happened.
    events: Mutex<Vec<PlatformEvent>>,
    /// The simulated server-side monitor list.
    monitors: Mutex<Vec<MonitorSpec>>,
    /// Region of the most recently shown window.
    last_window: Mutex<Option<Region>>,
    /// Number of guards currently alive.
    live: Mutex<usize>,
    /// When set, the matching step returns an error.
    fail_at: Option<FailurePoint>,
}

impl MockPlatform {
    /// Creates a mock where every step succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose `point` step fails.
    pub fn failing_at(point: FailurePoint) -> Self {
        Self {
            fail_at: Some(point),
            ..Self::default()
        }
    }

    /// Snapshot of the event log.
    pub fn events(&self) -> Vec<PlatformEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Snapshot of the simulated monitor list.
    pub fn monitors(&self) -> Vec<MonitorSpec> {
        self.monitors.lock().unwrap().clone()
    }

    /// Region passed to the last `show_window` call.
    pub fn last_window(&self) -> Option<Region> {
        *self.last_window.lock().unwrap()
    }

    /// Number of monitor/window/surface guards not yet dropped.
    pub fn live_resources(&self) -> usize {
        *self.live.lock().unwrap()
    }

    /// Removes the monitor called `name`; unknown names are ignored.
    pub fn unregister(&self, name: &str) {
        self.monitors.lock().unwrap().retain(|m| m.name != name);
    }

    fn record(&self, event: PlatformEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn acquire(&self, event: PlatformEvent) {
        *self.live.lock().unwrap() += 1;
        self.record(event);
    }

    fn release(&self, event: PlatformEvent) {
        *self.live.lock().unwrap() -= 1;
        self.record(event);
    }

    fn fails_at(&self, point: FailurePoint) -> bool {
        self.fail_at == Some(point)
    }
}

/// Guard for a mock virtual monitor.
pub struct MockMonitor<'p> {
    platform: &'p MockPlatform,
    name: String,
}

impl Drop for MockMonitor<'_> {
    fn drop(&mut self) {
        self.platform.unregister(&self.name);
        self.platform.release(PlatformEvent::MonitorUnregistered);
    }
}

/// Guard for a mock overlay window.
pub struct MockWindow<'p> {
    platform: &'p MockPlatform,
    region: Region,
}

impl MockWindow<'_> {
    /// The region the window was created with.
    pub fn region(&self) -> Region {
        self.region
    }
}

impl Drop for MockWindow<'_> {
    fn drop(&mut self) {
        self.platform.release(PlatformEvent::WindowDestroyed);
    }
}

/// Guard for a mock drawing surface.
pub struct MockSurface<'w> {
    platform: &'w MockPlatform,
    /// How many times the surface has been painted.
    pub paints: u32,
}

impl Drop for MockSurface<'_> {
    fn drop(&mut self) {
        self.platform.release(PlatformEvent::SurfaceReleased);
    }
}

impl OverlayPlatform for MockPlatform {
    type Monitor<'p> = MockMonitor<'p> where Self: 'p;
    type Window<'p> = MockWindow<'p> where Self: 'p;
    type Surface<'w> = MockSurface<'w> where Self: 'w;

    fn register_monitor(&self, spec: &MonitorSpec) -> Result<MockMonitor<'_>, OverlayError> {
        if self.fails_at(FailurePoint::RegisterMonitor) {
            return Err(OverlayError::NoOutputs);
        }
        {
            let mut monitors = self.monitors.lock().unwrap();
            monitors.retain(|m| m.name != spec.name);
            monitors.push(spec.clone());
        }
        self.acquire(PlatformEvent::MonitorRegistered);
        Ok(MockMonitor {
            platform: self,
            name: spec.name.clone(),
        })
    }

    fn show_window(&self, region: Region) -> Result<MockWindow<'_>, OverlayError> {
        if self.fails_at(FailurePoint::ShowWindow) {
            return Err(OverlayError::NoArgbVisual);
        }
        *self.last_window.lock().unwrap() = Some(region);
        self.acquire(PlatformEvent::WindowShown);
        Ok(MockWindow {
            platform: self,
            region,
        })
    }

    fn bind_surface<'w>(
        &'w self,
        _window: &'w MockWindow<'_>,
    ) -> Result<MockSurface<'w>, OverlayError> {
        if self.fails_at(FailurePoint::BindSurface) {
            return Err(OverlayError::Surface("mock surface failure".to_string()));
        }
        self.acquire(PlatformEvent::SurfaceBound);
        Ok(MockSurface {
            platform: self,
            paints: 0,
        })
    }

    fn paint(
        &self,
        surface: &mut MockSurface<'_>,
        _style: &HighlightStyle,
    ) -> Result<(), OverlayError> {
        if self.fails_at(FailurePoint::Paint) {
            return Err(OverlayError::Paint("mock paint failure".to_string()));
        }
        surface.paints += 1;
        self.record(PlatformEvent::Painted);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
