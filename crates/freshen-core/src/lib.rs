//! Backend contract for pluggable update checking and installation
//!
//! A host application drives interchangeable updater backends through the
//! [`UpdaterBackend`] trait. Backends declare their optional capabilities once
//! via [`BackendFeatures`] and report all asynchronous outcomes over an
//! [`EventBus`]; the check and install-trigger lifecycles are guarded by the
//! [`CheckSession`] and [`InstallTrigger`] state machines.

pub mod authorizer;
pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod features;
pub mod info;
pub mod installer;
pub mod session;
pub mod trigger;

pub use authorizer::{AdminAuthorizer, NoElevation};
pub use backend::UpdaterBackend;
pub use config::{string_list, ConfigProvider, MemoryConfig};
pub use error::{BackendError, Result};
pub use events::{valid_progress, BackendEvent, EventBus, PROGRESS_INDETERMINATE};
pub use features::BackendFeatures;
pub use info::{SecondaryInfo, UpdateInfo};
pub use installer::UpdateInstaller;
pub use session::{CheckResult, CheckSession, CheckState};
pub use trigger::{InstallOutcome, InstallTrigger, TriggerState};
