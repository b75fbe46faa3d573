//! Checkers test support utilities
//!
//! Shared by the module's unit and integration tests: one logging bootstrap
//! and the well-known account addresses used throughout the scenarios.

pub mod accounts;
pub mod logging;
