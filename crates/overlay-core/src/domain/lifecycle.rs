//! Lifecycle state machine for the overlay controller.
//!
//! The controller moves strictly forward through these states:
//!
//! ```text
//! Uninitialized → MonitorRegistered → WindowShown → Painted
//!               → Waiting → ShuttingDown → Terminated
//! ```
//!
//! A failure during set-up does not move the machine at all: the controller
//! drops the resources it already holds and returns the error, so the last
//! state reached tells you how far set-up got.

use std::fmt;

use thiserror::Error;
use tracing::trace;

/// Errors produced by [`LifecycleState::advance`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The requested state is not the immediate successor of the current one.
    #[error("invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

/// Where the overlay is in its start-up / shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    /// Display connection open, nothing else created.
    Uninitialized,
    /// The virtual monitor is registered with RandR.
    MonitorRegistered,
    /// The overlay window is created and mapped.
    WindowShown,
    /// The drawing surface is bound and the frame painted.
    Painted,
    /// Blocked on the termination signal.
    Waiting,
    /// Releasing resources in reverse order.
    ShuttingDown,
    /// Everything released.
    Terminated,
}

impl LifecycleState {
    /// All states in order.
    pub const ALL: [LifecycleState; 7] = [
        LifecycleState::Uninitialized,
        LifecycleState::MonitorRegistered,
        LifecycleState::WindowShown,
        LifecycleState::Painted,
        LifecycleState::Waiting,
        LifecycleState::ShuttingDown,
        LifecycleState::Terminated,
    ];

    /// Returns the state that follows this one, or `None` for `Terminated`.
    pub fn next(self) -> Option<LifecycleState> {
        use LifecycleState::*;
        match self {
            Uninitialized => Some(MonitorRegistered),
            MonitorRegistered => Some(WindowShown),
            WindowShown => Some(Painted),
            Painted => Some(Waiting),
            Waiting => Some(ShuttingDown),
            ShuttingDown => Some(Terminated),
            Terminated => None,
        }
    }

    /// Moves to `to` if it is the immediate successor.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] for skips, repeats and
    /// backward moves.
    pub fn advance(self, to: LifecycleState) -> Result<LifecycleState, LifecycleError> {
        if self.next() == Some(to) {
            trace!(from = %self, to = %to, "lifecycle transition");
            Ok(to)
        } else {
            Err(LifecycleError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::MonitorRegistered => "monitor-registered",
            LifecycleState::WindowShown => "window-shown",
            LifecycleState::Painted => "painted",
            LifecycleState::Waiting => "waiting",
            LifecycleState::ShuttingDown => "shutting-down",
            LifecycleState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
