//! The polymorphic backend contract

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ConfigProvider;
use crate::error::Result;
use crate::events::EventBus;
use crate::features::BackendFeatures;
use crate::info::{SecondaryInfo, UpdateInfo};
use crate::installer::UpdateInstaller;

/// Core trait every updater backend implements
///
/// Lifecycle: construct, [`initialize`](Self::initialize) exactly once, then
/// drive checks and triggers. A failed handshake makes the instance unusable
/// and it must be discarded. All outcome reporting goes through the bus
/// returned by [`events`](Self::events); subscribe before issuing a
/// triggering call.
///
/// Every method here is non-blocking from the caller's perspective: checks
/// and installs run on background tasks and report through the bus. Invoking
/// a member whose capability flag is absent is a caller error; a backend may
/// ignore such a call or treat it as if the flag were absent, but it must
/// never panic over it.
#[async_trait]
pub trait UpdaterBackend: Send + Sync {
    /// Stable identifier of this backend implementation
    fn key(&self) -> &str;

    /// Immutable capability flags, fixed for the lifetime of the instance
    fn features(&self) -> BackendFeatures;

    /// One-time handshake handing over the settings source
    ///
    /// Must complete successfully before any other method is called.
    async fn initialize(&mut self, config: Arc<dyn ConfigProvider>) -> Result<()>;

    /// Settings handed over at initialization; `None` before the handshake
    fn config(&self) -> Option<Arc<dyn ConfigProvider>>;

    /// Event bus carrying progress and completion signals
    fn events(&self) -> &EventBus;

    /// Begin one check session
    ///
    /// Must return before the check completes; the final `CheckDone` event
    /// follows on the bus, at most once per session and never before this
    /// call has returned. Only checks cheap enough to be negligible (say,
    /// reading one local file) may block briefly instead.
    async fn check_for_updates(&self);

    /// Cancel an active check
    ///
    /// Soft requests (`force = false`) are advisory and may be outrun by
    /// natural completion. Forced requests must stop the session as fast as
    /// possible, even into an inconsistent internal state, and still produce
    /// a final `CheckDone`. A no-op outside an active session.
    async fn abort(&self, force: bool);

    /// Launch the external installer
    ///
    /// Requires `TRIGGER_INSTALL`; `track = true` additionally requires
    /// `PARALLEL_TRIGGER`. `infos` is advisory targeting information the
    /// backend may ignore. Returns whether an installer was launched, not
    /// whether installation succeeds. Accepting a legally tracked request
    /// commits the backend to exactly one `TriggerInstallDone` event.
    async fn trigger_updates(&self, _infos: &[UpdateInfo], _track: bool) -> bool {
        false
    }

    /// Create a handle for an install this process drives itself
    ///
    /// Requires `PERFORM_INSTALL`. `None` is allowed even with the flag set;
    /// the flag declares the capability, not a per-call guarantee.
    async fn create_installer(&self) -> Option<Box<dyn UpdateInstaller>> {
        None
    }

    /// Which `data` entry is suitable as a secondary display column
    fn secondary_info(&self) -> Option<SecondaryInfo> {
        None
    }
}
