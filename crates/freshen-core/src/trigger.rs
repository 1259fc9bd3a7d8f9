//! Install-trigger lifecycle: one run of the installer-launch state machine

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, Result};

/// Final report of one tracked installer launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOutcome {
    pub success: bool,
}

impl InstallOutcome {
    pub fn new(success: bool) -> Self {
        Self { success }
    }
}

/// Lifecycle states of an installer launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerState {
    /// No launch attempted, or the last attempt failed
    #[default]
    Idle,
    /// A launch request is with the backend
    Launching,
    /// The installer runs detached; fire-and-forget, terminal for the invocation
    LaunchedUntracked,
    /// The installer runs and its completion will be reported
    Tracking,
    /// The tracked install reported its outcome
    Installed,
}

/// Guards the `Idle → Launching → {LaunchedUntracked, Tracking → Installed}`
/// lifecycle
///
/// The slot is reusable: a new invocation may begin once the previous one is
/// no longer in flight (`Idle`, `LaunchedUntracked` or `Installed`).
#[derive(Debug, Default)]
pub struct InstallTrigger {
    state: TriggerState,
}

impl InstallTrigger {
    /// Create an idle trigger slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Whether a launch or tracked install is in flight
    pub fn in_flight(&self) -> bool {
        matches!(self.state, TriggerState::Launching | TriggerState::Tracking)
    }

    /// Start a new launch invocation
    ///
    /// Legal unless a previous invocation is still in flight.
    pub fn begin(&mut self) -> Result<()> {
        if self.in_flight() {
            return Err(BackendError::state(format!(
                "cannot launch an installer from {:?}",
                self.state
            )));
        }
        self.state = TriggerState::Launching;
        Ok(())
    }

    /// Record that the launch failed; the slot returns to `Idle`
    pub fn launch_failed(&mut self) -> Result<()> {
        match self.state {
            TriggerState::Launching => {
                self.state = TriggerState::Idle;
                Ok(())
            }
            other => Err(BackendError::state(format!(
                "no launch in progress ({other:?})"
            ))),
        }
    }

    /// Record a successful launch
    ///
    /// With `tracked = false` the invocation is terminal; with `tracked =
    /// true` the backend has committed to reporting exactly one outcome.
    pub fn launched(&mut self, tracked: bool) -> Result<()> {
        match self.state {
            TriggerState::Launching => {
                self.state = if tracked {
                    TriggerState::Tracking
                } else {
                    TriggerState::LaunchedUntracked
                };
                Ok(())
            }
            other => Err(BackendError::state(format!(
                "no launch in progress ({other:?})"
            ))),
        }
    }

    /// Record the outcome of a tracked install
    ///
    /// Legal only from `Tracking`, at most once per invocation.
    pub fn installed(&mut self) -> Result<()> {
        match self.state {
            TriggerState::Tracking => {
                self.state = TriggerState::Installed;
                Ok(())
            }
            other => Err(BackendError::state(format!(
                "no tracked install in progress ({other:?})"
            ))),
        }
    }
}
