//! Elevated-rights boundary for launching installers

/// Runs programs with elevated rights on behalf of a backend
///
/// Backends whose installer needs more rights than the launching process has
/// consult one of these instead of elevating themselves. How elevation is
/// obtained (sudo prompt, UAC dialog, polkit, ...) is the implementation's
/// business.
pub trait AdminAuthorizer: Send + Sync {
    /// Whether this process already has elevated rights
    fn has_admin_rights(&self) -> bool;

    /// Run `program` with `arguments` elevated
    ///
    /// Returns `true` when the elevated launch succeeded.
    fn execute_as_admin(&self, program: &str, arguments: &[String]) -> bool;
}

/// Null authorizer: treats the current rights as sufficient and refuses
/// elevation requests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoElevation;

impl AdminAuthorizer for NoElevation {
    fn has_admin_rights(&self) -> bool {
        true
    }

    fn execute_as_admin(&self, _program: &str, _arguments: &[String]) -> bool {
        false
    }
}
