//! In-process installer handle

use async_trait::async_trait;

use crate::error::Result;
use crate::info::UpdateInfo;
use crate::trigger::InstallOutcome;

/// An install that the host process drives to completion itself
///
/// Obtained from `create_installer` on backends declaring `PERFORM_INSTALL`.
/// Concrete install mechanics are backend territory; this is only the handle
/// the host holds while the install runs.
#[async_trait]
pub trait UpdateInstaller: Send + Sync {
    /// Updates this install will cover
    fn components(&self) -> Vec<UpdateInfo>;

    /// Run the install to completion
    async fn install(&mut self) -> Result<InstallOutcome>;

    /// Abort a running install where the mechanism allows it
    async fn cancel(&mut self) {}
}
