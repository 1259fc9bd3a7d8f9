//! Host-side driver for freshen update backends
//!
//! [`Updater`] owns one backend, performs the initialization handshake,
//! enforces the capability gating and lifecycle rules of the contract, caches
//! check results, and re-publishes backend events to the host.
//! [`UpdateScheduler`] re-runs checks on a fixed interval.

pub mod error;
pub mod scheduler;
pub mod updater;

pub use error::{Result, UpdaterError};
pub use scheduler::UpdateScheduler;
pub use updater::{Updater, UpdaterState};
