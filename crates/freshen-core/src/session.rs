//! Check-session lifecycle: one run of the check-for-updates state machine

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, Result};
use crate::info::UpdateInfo;

/// Final report of one check session
///
/// `updates` preserves discovery order. `success = false` means "an error
/// occurred" regardless of contents; a backend may still hand over partial
/// results with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub success: bool,
    pub updates: Vec<UpdateInfo>,
}

impl CheckResult {
    /// Successful completion with the discovered updates
    pub fn ok(updates: Vec<UpdateInfo>) -> Self {
        Self {
            success: true,
            updates,
        }
    }

    /// Failed completion with no results
    pub fn failed() -> Self {
        Self {
            success: false,
            updates: Vec::new(),
        }
    }
}

/// Lifecycle states of a check session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CheckState {
    /// No session running; a new one may begin
    #[default]
    Idle,
    /// A check is in flight
    Checking,
    /// Cancellation was requested while checking
    Aborting,
    /// The session reported its result; reset before starting another
    Done,
}

/// Guards the `Idle → Checking → Done` lifecycle with an `Aborting` sub-state
///
/// One instance tracks one session slot. At most one session is active at a
/// time and its completion is recorded at most once; a completed slot must be
/// [`reset`](Self::reset) before the next session may begin.
#[derive(Debug, Default)]
pub struct CheckSession {
    state: CheckState,
    forced: bool,
}

impl CheckSession {
    /// Create an idle session slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> CheckState {
        self.state
    }

    /// Whether a check is in flight (`Checking` or `Aborting`)
    pub fn is_active(&self) -> bool {
        matches!(self.state, CheckState::Checking | CheckState::Aborting)
    }

    /// Whether the pending abort, if any, was forced
    pub fn abort_forced(&self) -> bool {
        self.forced
    }

    /// Start a new session
    ///
    /// Legal only from `Idle`.
    pub fn begin(&mut self) -> Result<()> {
        match self.state {
            CheckState::Idle => {
                self.state = CheckState::Checking;
                self.forced = false;
                Ok(())
            }
            other => Err(BackendError::state(format!(
                "cannot start a check from {other:?}"
            ))),
        }
    }

    /// Request cancellation of the active check
    ///
    /// Transitions to `Aborting` only from `Checking` and returns `true`;
    /// anywhere else the call is a no-op returning `false`. A forced request
    /// upgrades a pending soft one.
    pub fn request_abort(&mut self, force: bool) -> bool {
        match self.state {
            CheckState::Checking => {
                self.state = CheckState::Aborting;
                self.forced = force;
                true
            }
            CheckState::Aborting if force && !self.forced => {
                self.forced = true;
                true
            }
            _ => false,
        }
    }

    /// Record that the session reported its result
    ///
    /// Legal from `Checking` or `Aborting`, at most once per session.
    pub fn complete(&mut self) -> Result<()> {
        match self.state {
            CheckState::Checking | CheckState::Aborting => {
                self.state = CheckState::Done;
                Ok(())
            }
            other => Err(BackendError::state(format!(
                "cannot complete a check from {other:?}"
            ))),
        }
    }

    /// Make the slot available for the next session
    ///
    /// Returns `true` when a completed session was cleared.
    pub fn reset(&mut self) -> bool {
        if self.state == CheckState::Done {
            self.state = CheckState::Idle;
            self.forced = false;
            true
        } else {
            false
        }
    }
}
