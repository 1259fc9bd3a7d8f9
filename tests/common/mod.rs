//! Scripted mock backend shared by the contract test suites
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use freshen_core::{
    AdminAuthorizer, BackendFeatures, CheckResult, ConfigProvider, EventBus, InstallOutcome,
    SecondaryInfo, UpdateInfo, UpdateInstaller, UpdaterBackend,
};

/// How a scripted check reacts to abort requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortPolicy {
    /// Soft requests are ignored; the check runs to natural completion
    IgnoreSoft,
    /// Soft requests stop the check cleanly (`success = true`, no updates)
    HonorSoft,
}

/// What a forced abort reports, a backend policy choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedPolicy {
    /// The backend stopped cleanly anyway
    CleanStop,
    /// The backend stopped in an inconsistent state
    DirtyStop,
}

/// Fully scripted backend driving every contract path from tests
pub struct ScriptedBackend {
    pub features: BackendFeatures,
    pub events: EventBus,
    pub config: Option<Arc<dyn ConfigProvider>>,
    /// progress reports emitted before natural completion
    pub progress_script: Vec<(f64, String)>,
    /// result of a natural (un-aborted) completion
    pub natural_result: CheckResult,
    /// pause between scripted events
    pub step_delay: Duration,
    pub abort_policy: AbortPolicy,
    pub forced_policy: ForcedPolicy,
    /// whether installer launches succeed
    pub launch_ok: bool,
    /// outcome reported for tracked launches
    pub install_success: bool,
    /// elevation boundary consulted before launching, if any
    pub authorizer: Option<Arc<dyn AdminAuthorizer>>,
    /// installer handle handed out by `create_installer`
    pub installer_available: bool,
    pub secondary: Option<SecondaryInfo>,

    soft_requested: Arc<AtomicBool>,
    force_requested: Arc<AtomicBool>,
    pub trigger_calls: Arc<AtomicUsize>,
    /// advisory targeting information received by the last trigger call
    pub infos_seen: Arc<Mutex<Vec<UpdateInfo>>>,
}

impl ScriptedBackend {
    pub fn new(features: BackendFeatures) -> Self {
        Self {
            features,
            events: EventBus::new(),
            config: None,
            progress_script: Vec::new(),
            natural_result: CheckResult::ok(vec![]),
            step_delay: Duration::from_millis(20),
            abort_policy: AbortPolicy::IgnoreSoft,
            forced_policy: ForcedPolicy::DirtyStop,
            launch_ok: true,
            install_success: true,
            authorizer: None,
            installer_available: false,
            secondary: None,
            soft_requested: Arc::new(AtomicBool::new(false)),
            force_requested: Arc::new(AtomicBool::new(false)),
            trigger_calls: Arc::new(AtomicUsize::new(0)),
            infos_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_progress(mut self, script: &[(f64, &str)]) -> Self {
        self.progress_script = script
            .iter()
            .map(|(percent, status)| (*percent, status.to_string()))
            .collect();
        self
    }

    pub fn with_result(mut self, result: CheckResult) -> Self {
        self.natural_result = result;
        self
    }

    pub fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    pub fn with_forced_policy(mut self, policy: ForcedPolicy) -> Self {
        self.forced_policy = policy;
        self
    }

    pub fn with_launch_ok(mut self, ok: bool) -> Self {
        self.launch_ok = ok;
        self
    }

    pub fn with_install_success(mut self, success: bool) -> Self {
        self.install_success = success;
        self
    }

    pub fn with_authorizer<A: AdminAuthorizer + 'static>(mut self, authorizer: Arc<A>) -> Self {
        self.authorizer = Some(authorizer as Arc<dyn AdminAuthorizer>);
        self
    }

    pub fn with_installer(mut self) -> Self {
        self.installer_available = true;
        self
    }

    pub fn with_secondary(mut self, key: &str, label: &str) -> Self {
        self.secondary = Some(SecondaryInfo::new(key, label));
        self
    }
}

#[async_trait]
impl UpdaterBackend for ScriptedBackend {
    fn key(&self) -> &str {
        "scripted"
    }

    fn features(&self) -> BackendFeatures {
        self.features
    }

    async fn initialize(&mut self, config: Arc<dyn ConfigProvider>) -> freshen_core::Result<()> {
        self.config = Some(config);
        Ok(())
    }

    fn config(&self) -> Option<Arc<dyn ConfigProvider>> {
        self.config.clone()
    }

    fn events(&self) -> &EventBus {
        &self.events
    }

    async fn check_for_updates(&self) {
        self.soft_requested.store(false, Ordering::SeqCst);
        self.force_requested.store(false, Ordering::SeqCst);

        let events = self.events.clone();
        let script = self.progress_script.clone();
        let natural = self.natural_result.clone();
        let delay = self.step_delay;
        let honor_soft = self.abort_policy == AbortPolicy::HonorSoft;
        let forced_success = self.forced_policy == ForcedPolicy::CleanStop;
        let soft = Arc::clone(&self.soft_requested);
        let force = Arc::clone(&self.force_requested);

        tokio::spawn(async move {
            for (percent, status) in script {
                tokio::time::sleep(delay).await;
                if force.load(Ordering::SeqCst) {
                    events.check_done(forced_success, vec![]);
                    return;
                }
                if honor_soft && soft.load(Ordering::SeqCst) {
                    events.check_done(true, vec![]);
                    return;
                }
                events.check_progress(percent, status);
            }

            tokio::time::sleep(delay).await;
            if force.load(Ordering::SeqCst) {
                events.check_done(forced_success, vec![]);
                return;
            }
            if honor_soft && soft.load(Ordering::SeqCst) {
                events.check_done(true, vec![]);
                return;
            }
            events.check_done(natural.success, natural.updates);
        });
    }

    async fn abort(&self, force: bool) {
        if force {
            self.force_requested.store(true, Ordering::SeqCst);
        } else {
            self.soft_requested.store(true, Ordering::SeqCst);
        }
    }

    async fn trigger_updates(&self, infos: &[UpdateInfo], track: bool) -> bool {
        self.trigger_calls.fetch_add(1, Ordering::SeqCst);
        *self.infos_seen.lock().unwrap() = infos.to_vec();

        // tolerate the illegal call instead of crashing over it
        if !self.features.contains(BackendFeatures::TRIGGER_INSTALL) {
            return false;
        }
        if track && !self.features.contains(BackendFeatures::PARALLEL_TRIGGER) {
            return false;
        }

        let launched = match &self.authorizer {
            Some(authorizer) if !authorizer.has_admin_rights() => {
                authorizer.execute_as_admin("installer", &["--updater".to_string()])
            }
            _ => self.launch_ok,
        };
        if !launched {
            return false;
        }

        if track {
            let events = self.events.clone();
            let success = self.install_success;
            let delay = self.step_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                events.trigger_install_done(success);
            });
        }
        true
    }

    async fn create_installer(&self) -> Option<Box<dyn UpdateInstaller>> {
        if !self.installer_available {
            return None;
        }
        Some(Box::new(ScriptedInstaller {
            components: self.natural_result.updates.clone(),
            success: self.install_success,
        }))
    }

    fn secondary_info(&self) -> Option<SecondaryInfo> {
        self.secondary.clone()
    }
}

/// Installer handle handed out by the scripted backend
pub struct ScriptedInstaller {
    components: Vec<UpdateInfo>,
    success: bool,
}

#[async_trait]
impl UpdateInstaller for ScriptedInstaller {
    fn components(&self) -> Vec<UpdateInfo> {
        self.components.clone()
    }

    async fn install(&mut self) -> freshen_core::Result<InstallOutcome> {
        Ok(InstallOutcome::new(self.success))
    }
}

/// Authorizer that records elevation requests
pub struct RecordingAuthorizer {
    pub elevated: bool,
    pub grant: bool,
    pub requests: AtomicUsize,
}

impl RecordingAuthorizer {
    pub fn new(elevated: bool, grant: bool) -> Self {
        Self {
            elevated,
            grant,
            requests: AtomicUsize::new(0),
        }
    }
}

impl AdminAuthorizer for RecordingAuthorizer {
    fn has_admin_rights(&self) -> bool {
        self.elevated
    }

    fn execute_as_admin(&self, _program: &str, _arguments: &[String]) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.grant
    }
}
