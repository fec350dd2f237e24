//! Screenshare overlay entry point.
//!
//! Highlights a rectangle of the screen and registers it as a RandR virtual
//! monitor so screen-sharing tools can capture exactly that rectangle.
//!
//! # Usage
//!
//! ```text
//! screenshare-overlay <WIDTH> <HEIGHT> <X> <Y> [--monitor-name NAME]
//! ```
//!
//! The process prints `waiting for sigint to stdout` once the overlay is up
//! and `shutting down` when SIGINT or SIGTERM arrives, then removes the
//! monitor and the window and exits with status 0.
//!
//! # Environment variables
//!
//! | Variable               | Default       | Description                  |
//! |------------------------|---------------|------------------------------|
//! | `DISPLAY`              | –             | X display to connect to      |
//! | `OVERLAY_MONITOR_NAME` | `screenshare` | Name of the virtual monitor  |
//! | `RUST_LOG`             | `info`        | Log filter (logs go to stderr) |
//!
//! # Exit status
//!
//! - `0` after a signal-driven shutdown.
//! - `2` for usage errors (wrong argument count, non-numeric values); no X
//!   connection is attempted.
//! - `1` for any set-up failure.  A missing 32-bit visual is reported on
//!   stdout, everything else on stderr.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use overlay_core::{Region, DEFAULT_MONITOR_NAME};
use screenshare_overlay::application::OverlayError;
use screenshare_overlay::domain::OverlayConfig;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Expose a screen region as a virtual monitor for screen sharing.
#[derive(Debug, Parser)]
#[command(name = "screenshare-overlay", version)]
struct Cli {
    /// Width of the region in pixels.
    #[arg(allow_negative_numbers = true)]
    width: i32,

    /// Height of the region in pixels.
    #[arg(allow_negative_numbers = true)]
    height: i32,

    /// X coordinate of the region's top-left corner.
    #[arg(allow_negative_numbers = true)]
    x: i32,

    /// Y coordinate of the region's top-left corner.
    #[arg(allow_negative_numbers = true)]
    y: i32,

    /// Name to register the virtual monitor under.
    #[arg(long, default_value = DEFAULT_MONITOR_NAME, env = "OVERLAY_MONITOR_NAME")]
    monitor_name: String,
}

impl Cli {
    /// Converts the parsed arguments into an [`OverlayConfig`].
    fn into_config(self) -> OverlayConfig {
        OverlayConfig::new(Region::new(self.width, self.height, self.x, self.y))
            .with_monitor_name(self.monitor_name)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// The runtime is single-threaded: the overlay does no concurrent work and
/// its X resources are not `Send`.  The only await point is the termination
/// signal.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse first so usage errors exit before anything touches the display.
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config();
    info!(
        region = %config.region,
        monitor = %config.monitor_name,
        "screenshare overlay starting"
    );

    match run(&config).await {
        Ok(()) => {
            info!("screenshare overlay stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(err);
            ExitCode::FAILURE
        }
    }
}

/// Connects to X, runs the overlay and closes the connection last.
#[cfg(target_os = "linux")]
async fn run(config: &OverlayConfig) -> Result<(), OverlayError> {
    use screenshare_overlay::application::run_overlay;
    use screenshare_overlay::infrastructure::console::ConsoleObserver;
    use screenshare_overlay::infrastructure::signal::ShutdownSignal;
    use screenshare_overlay::infrastructure::x11::X11Platform;

    let mut shutdown = ShutdownSignal::install()?;
    let platform = X11Platform::open()?;
    let mut observer = ConsoleObserver::new();
    run_overlay(&platform, config, shutdown.wait(), &mut observer).await
}

#[cfg(not(target_os = "linux"))]
async fn run(_config: &OverlayConfig) -> Result<(), OverlayError> {
    Err(OverlayError::DisplayUnavailable(
        "the overlay requires an X11 display and is only built for Linux".to_string(),
    ))
}

/// Prints a fatal error where the user expects it.
fn report(err: OverlayError) {
    if err.is_capability_error() {
        println!("{err}");
    } else {
        let err = anyhow::Error::new(err).context("screenshare overlay failed");
        eprintln!("{err:#}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
