//! Driver owning one backend instance

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use freshen_core::{
    valid_progress, BackendEvent, BackendFeatures, CheckResult, CheckSession, ConfigProvider,
    EventBus, InstallTrigger, SecondaryInfo, UpdateInfo, UpdateInstaller, UpdaterBackend,
};

use crate::error::{Result, UpdaterError};

/// Host-facing snapshot of the driver's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdaterState {
    /// No check has produced a result yet
    #[default]
    Idle,
    /// A check session is running
    Checking,
    /// The last check finished with updates to offer
    UpdatesAvailable,
    /// The last check finished and found nothing
    NoUpdates,
    /// The last check or tracked install failed
    Error,
    /// A tracked installer launch is running
    Installing,
}

/// Shared state between the driver handle and its event forwarder
struct Shared {
    session: Mutex<CheckSession>,
    trigger: Mutex<InstallTrigger>,
    latest: RwLock<Option<CheckResult>>,
    last_check: RwLock<Option<DateTime<Utc>>>,
    state: RwLock<UpdaterState>,
    bus: EventBus,
}

/// Drives one updater backend on behalf of the host
///
/// Performs the initialization handshake at construction, refuses calls the
/// backend's feature set does not permit, keeps the check/trigger state
/// machines, and re-publishes backend events after enforcement (duplicate or
/// stray completions are dropped, never delivered twice).
pub struct Updater {
    backend: Arc<dyn UpdaterBackend>,
    shared: Arc<Shared>,
    forwarder: JoinHandle<()>,
}

impl Updater {
    /// Initialize `backend` with `config` and wrap it
    ///
    /// A failed handshake consumes the backend (it must not be reused) and
    /// surfaces the error.
    pub async fn new(
        mut backend: Box<dyn UpdaterBackend>,
        config: Arc<dyn ConfigProvider>,
    ) -> Result<Self> {
        backend.initialize(config).await?;

        let backend: Arc<dyn UpdaterBackend> = Arc::from(backend);
        let shared = Arc::new(Shared {
            session: Mutex::new(CheckSession::new()),
            trigger: Mutex::new(InstallTrigger::new()),
            latest: RwLock::new(None),
            last_check: RwLock::new(None),
            state: RwLock::new(UpdaterState::Idle),
            bus: EventBus::new(),
        });

        // Subscribe before any triggering call so no report can be missed.
        let events = backend.events().subscribe();
        let forwarder = tokio::spawn(forward_events(events, Arc::clone(&shared)));

        info!(backend = backend.key(), "updater backend initialized");
        Ok(Self {
            backend,
            shared,
            forwarder,
        })
    }

    /// Identifier of the wrapped backend
    pub fn backend_key(&self) -> &str {
        self.backend.key()
    }

    /// Capability flags of the wrapped backend
    pub fn features(&self) -> BackendFeatures {
        self.backend.features()
    }

    /// Secondary display column offered by the backend, if any
    pub fn secondary_info(&self) -> Option<SecondaryInfo> {
        self.backend.secondary_info()
    }

    /// Current lifecycle snapshot
    pub async fn state(&self) -> UpdaterState {
        *self.shared.state.read().await
    }

    /// Result of the most recent completed check
    pub async fn latest_result(&self) -> Option<CheckResult> {
        self.shared.latest.read().await.clone()
    }

    /// Updates of the most recent completed check, discovery order preserved
    pub async fn latest_updates(&self) -> Vec<UpdateInfo> {
        self.shared
            .latest
            .read()
            .await
            .as_ref()
            .map(|result| result.updates.clone())
            .unwrap_or_default()
    }

    /// When the most recent check completed
    pub async fn last_check_at(&self) -> Option<DateTime<Utc>> {
        *self.shared.last_check.read().await
    }

    /// Subscribe to re-published backend events
    ///
    /// Progress arrives strictly between a check's start and its completion;
    /// completions arrive at most once per session.
    pub fn subscribe(&self) -> broadcast::Receiver<BackendEvent> {
        self.shared.bus.subscribe()
    }

    /// Start one check session
    ///
    /// Returns as soon as the backend has accepted the request; the result
    /// arrives as a `CheckDone` event. At most one session runs per instance;
    /// an overlapping call is refused with [`UpdaterError::CheckInProgress`].
    pub async fn check_for_updates(&self) -> Result<()> {
        {
            let mut session = self.shared.session.lock().await;
            session
                .begin()
                .map_err(|_| UpdaterError::CheckInProgress)?;
        }
        *self.shared.state.write().await = UpdaterState::Checking;

        debug!(backend = self.backend.key(), "starting update check");
        self.backend.check_for_updates().await;
        Ok(())
    }

    /// Request cancellation of the active check
    ///
    /// A no-op unless a check is running; idempotent once the session has
    /// left `Checking`. A forced request upgrades a pending soft one.
    pub async fn abort(&self, force: bool) {
        let transitioned = self.shared.session.lock().await.request_abort(force);
        if transitioned {
            debug!(force, "aborting update check");
            self.backend.abort(force).await;
        }
    }

    /// Launch the external installer for the updates of the last check
    ///
    /// Requires `TRIGGER_INSTALL`, and `PARALLEL_TRIGGER` when `track` is
    /// requested; the driver refuses the call before it reaches the backend
    /// otherwise. Returns whether an installer was launched. With an accepted
    /// tracked launch the state reads `Installing` until the backend reports
    /// the outcome.
    pub async fn trigger_updates(&self, track: bool) -> Result<bool> {
        let features = self.backend.features();
        if !features.contains(BackendFeatures::TRIGGER_INSTALL) {
            warn!(
                backend = self.backend.key(),
                "trigger_updates called without TRIGGER_INSTALL"
            );
            return Err(UpdaterError::UnsupportedFeature {
                feature: "TRIGGER_INSTALL",
            });
        }
        if track && !features.contains(BackendFeatures::PARALLEL_TRIGGER) {
            warn!(
                backend = self.backend.key(),
                "tracking requested without PARALLEL_TRIGGER"
            );
            return Err(UpdaterError::UnsupportedFeature {
                feature: "PARALLEL_TRIGGER",
            });
        }

        let infos = self.latest_updates().await;

        // The lock is held across the backend call so a completion event
        // cannot be processed before the launch is recorded.
        let mut trigger = self.shared.trigger.lock().await;
        trigger.begin().map_err(|_| UpdaterError::TriggerInProgress)?;

        let launched = self.backend.trigger_updates(&infos, track).await;
        if launched {
            trigger.launched(track).map_err(UpdaterError::from)?;
            if track {
                *self.shared.state.write().await = UpdaterState::Installing;
            }
            info!(track, updates = infos.len(), "installer launched");
        } else {
            trigger.launch_failed().map_err(UpdaterError::from)?;
            debug!(backend = self.backend.key(), "installer launch failed");
        }
        Ok(launched)
    }

    /// Create a handle for an install this process drives itself
    ///
    /// Requires `PERFORM_INSTALL`. `Ok(None)` means the backend declined for
    /// this call despite declaring the capability.
    pub async fn create_installer(&self) -> Result<Option<Box<dyn UpdateInstaller>>> {
        if !self
            .backend
            .features()
            .contains(BackendFeatures::PERFORM_INSTALL)
        {
            warn!(
                backend = self.backend.key(),
                "create_installer called without PERFORM_INSTALL"
            );
            return Err(UpdaterError::UnsupportedFeature {
                feature: "PERFORM_INSTALL",
            });
        }
        Ok(self.backend.create_installer().await)
    }
}

impl Drop for Updater {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Drain backend events, apply contract enforcement, re-publish
async fn forward_events(mut events: broadcast::Receiver<BackendEvent>, shared: Arc<Shared>) {
    loop {
        match events.recv().await {
            Ok(event) => handle_event(event, &shared).await,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "backend event stream lagged, reports were dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn handle_event(event: BackendEvent, shared: &Shared) {
    match event {
        BackendEvent::CheckProgress { percent, status } => {
            if !shared.session.lock().await.is_active() {
                warn!(percent, "progress report outside an active check, dropped");
                return;
            }
            if !valid_progress(percent) {
                warn!(percent, "backend reported an out-of-range progress percent");
            }
            shared.bus.check_progress(percent, status);
        }
        BackendEvent::CheckDone { success, updates } => {
            {
                let mut session = shared.session.lock().await;
                if session.complete().is_err() {
                    warn!("duplicate or stray check completion, dropped");
                    return;
                }
                // the slot frees up immediately so the host can retry
                session.reset();
            }

            let result = CheckResult { success, updates };
            *shared.state.write().await = if !result.success {
                UpdaterState::Error
            } else if result.updates.is_empty() {
                UpdaterState::NoUpdates
            } else {
                UpdaterState::UpdatesAvailable
            };
            *shared.last_check.write().await = Some(Utc::now());
            *shared.latest.write().await = Some(result.clone());

            debug!(
                success = result.success,
                updates = result.updates.len(),
                "check session completed"
            );
            shared.bus.check_done(result.success, result.updates);
        }
        BackendEvent::TriggerInstallDone { success } => {
            {
                let mut trigger = shared.trigger.lock().await;
                if trigger.installed().is_err() {
                    warn!("install outcome without a tracked launch, dropped");
                    return;
                }
            }

            *shared.state.write().await = if success {
                UpdaterState::NoUpdates
            } else {
                UpdaterState::Error
            };

            debug!(success, "tracked install completed");
            shared.bus.trigger_install_done(success);
        }
    }
}
