//! Broadcast delivery of backend progress and completion signals
//!
//! Backends never call back into the host directly. They publish
//! [`BackendEvent`]s on their [`EventBus`]; the host subscribes before issuing
//! a triggering call and observes completions strictly after that call has
//! returned.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::info::UpdateInfo;

/// Sentinel percent value meaning indeterminate progress
pub const PROGRESS_INDETERMINATE: f64 = -1.0;

/// Channel capacity for broadcast events
const CHANNEL_CAPACITY: usize = 256;

/// Whether a progress percent is legal under the contract
///
/// Legal values lie in `[0.0, 1.0]` or equal [`PROGRESS_INDETERMINATE`]
/// exactly.
pub fn valid_progress(percent: f64) -> bool {
    percent == PROGRESS_INDETERMINATE || (0.0..=1.0).contains(&percent)
}

/// Signals a backend emits while checking or tracking an install
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendEvent {
    /// Progress report during an active check session
    ///
    /// An empty `status` means "leave the previously reported status
    /// unchanged".
    CheckProgress { percent: f64, status: String },
    /// Final report of a check session, delivered at most once per session
    CheckDone {
        success: bool,
        updates: Vec<UpdateInfo>,
    },
    /// Final report of a tracked installer launch
    TriggerInstallDone { success: bool },
}

/// Event bus connecting one backend instance to its host
///
/// Cloning shares the underlying broadcast channel. Publishing with no
/// subscribers is not an error; subscribers only observe events published
/// after they subscribed.
///
/// # Example
///
/// ```rust
/// use freshen_core::{BackendEvent, EventBus};
///
/// # tokio_test::block_on(async {
/// let bus = EventBus::new();
/// let mut subscriber = bus.subscribe();
///
/// bus.check_progress(0.3, "scanning");
///
/// match subscriber.recv().await.unwrap() {
///     BackendEvent::CheckProgress { percent, .. } => assert_eq!(percent, 0.3),
///     _ => unreachable!(),
/// }
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<BackendEvent>,
}

impl EventBus {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Create a new event bus with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: BackendEvent) {
        trace!(?event, "publishing backend event");
        // Ignore errors - it's ok if there are no subscribers
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive future events
    pub fn subscribe(&self) -> broadcast::Receiver<BackendEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publish a progress report
    pub fn check_progress(&self, percent: f64, status: impl Into<String>) {
        self.publish(BackendEvent::CheckProgress {
            percent,
            status: status.into(),
        });
    }

    /// Publish the final report of a check session
    pub fn check_done(&self, success: bool, updates: Vec<UpdateInfo>) {
        self.publish(BackendEvent::CheckDone { success, updates });
    }

    /// Publish the final report of a tracked installer launch
    pub fn trigger_install_done(&self, success: bool) {
        self.publish(BackendEvent::TriggerInstallDone { success });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
