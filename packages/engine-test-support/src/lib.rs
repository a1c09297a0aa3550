//! Engine test support utilities
//!
//! Shared helpers for unit and integration tests of the Ma Diao engine.

pub mod logging;
