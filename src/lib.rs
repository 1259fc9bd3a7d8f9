//! Workspace-level integration tests for the freshen crates
//!
//! The actual test suites live under `tests/`; they drive scripted mock
//! backends through the full contract via the public APIs of `freshen-core`
//! and `freshen-updater`.
