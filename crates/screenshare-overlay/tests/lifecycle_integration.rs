//! Integration tests for the lifecycle controller.
//!
//! These exercise `run_overlay` end-to-end against the mock platform:
//! configuration → monitor → window → surface → wait → reverse teardown.

use std::cell::Cell;

use overlay_core::{LifecycleState, Region};
use screenshare_overlay::application::{run_overlay, LifecycleObserver, OverlayError};
use screenshare_overlay::domain::OverlayConfig;
use screenshare_overlay::infrastructure::console::stdout_line;
use screenshare_overlay::infrastructure::mock::{MockPlatform, PlatformEvent};

/// Collects the stdout lines the console observer would print.
#[derive(Default)]
struct StdoutCapture {
    lines: Vec<&'static str>,
}

impl LifecycleObserver for StdoutCapture {
    fn on_transition(&mut self, state: LifecycleState) {
        if let Some(line) = stdout_line(state) {
            self.lines.push(line);
        }
    }
}

#[test]
fn test_end_to_end_scenario_registers_shows_and_removes() {
    // Arrange: the 400x300+100+50 scenario
    let region = Region::new(400, 300, 100, 50);
    let config = OverlayConfig::new(region);
    let platform = MockPlatform::new();
    let mut observer = StdoutCapture::default();
    let seen_while_waiting = Cell::new(None);

    let shutdown = async {
        let monitors = platform.monitors();
        seen_while_waiting.set(Some((monitors, platform.last_window())));
        Ok::<(), OverlayError>(())
    };

    // Act
    tokio_test::block_on(run_overlay(&platform, &config, shutdown, &mut observer))
        .expect("run");

    // Assert: while waiting, exactly our monitor and window existed
    let (monitors, window) = seen_while_waiting.take().expect("shutdown future polled");
    assert_eq!(monitors.len(), 1);
    assert_eq!(monitors[0].name, "screenshare");
    assert_eq!(monitors[0].region, region);
    assert_eq!(window, Some(region));

    // Assert: afterwards nothing is left and both messages were printed
    assert!(platform.monitors().is_empty());
    assert_eq!(platform.live_resources(), 0);
    assert_eq!(observer.lines, vec!["waiting for sigint to stdout", "shutting down"]);
}

#[test]
fn test_custom_monitor_name_is_registered() {
    let config = OverlayConfig::new(Region::new(10, 10, 0, 0)).with_monitor_name("demo");
    let platform = MockPlatform::new();
    let mut observer = StdoutCapture::default();
    let names = Cell::new(Vec::new());

    let shutdown = async {
        names.set(platform.monitors().into_iter().map(|m| m.name).collect());
        Ok::<(), OverlayError>(())
    };

    tokio_test::block_on(run_overlay(&platform, &config, shutdown, &mut observer))
        .expect("run");

    assert_eq!(names.take(), vec!["demo".to_string()]);
}

#[test]
fn test_failed_setup_prints_nothing_to_stdout() {
    use screenshare_overlay::infrastructure::mock::FailurePoint;

    let config = OverlayConfig::new(Region::new(10, 10, 0, 0));
    let platform = MockPlatform::failing_at(FailurePoint::ShowWindow);
    let mut observer = StdoutCapture::default();

    let result = tokio_test::block_on(run_overlay(
        &platform,
        &config,
        async { Ok::<(), OverlayError>(()) },
        &mut observer,
    ));

    assert!(matches!(result, Err(OverlayError::NoArgbVisual)));
    assert!(observer.lines.is_empty());
    assert_eq!(
        platform.events(),
        vec![
            PlatformEvent::MonitorRegistered,
            PlatformEvent::MonitorUnregistered
        ]
    );
}

#[test]
fn test_existing_monitor_with_same_name_is_replaced() {
    // Arrange: a stale "screenshare" monitor from an earlier run
    let platform = MockPlatform::new();
    let stale = OverlayConfig::new(Region::new(1, 1, 0, 0)).monitor_spec();
    let stale_guard = {
        use screenshare_overlay::application::OverlayPlatform;
        platform.register_monitor(&stale).expect("stale")
    };
    let config = OverlayConfig::new(Region::new(400, 300, 100, 50));
    let mut observer = StdoutCapture::default();
    let during = Cell::new(Vec::new());

    let shutdown = async {
        during.set(platform.monitors());
        Ok::<(), OverlayError>(())
    };

    // Act
    tokio_test::block_on(run_overlay(&platform, &config, shutdown, &mut observer))
        .expect("run");

    // Assert: only the new record was present while waiting
    let during = during.take();
    assert_eq!(during.len(), 1);
    assert_eq!(during[0].region, Region::new(400, 300, 100, 50));
    drop(stale_guard);
}
