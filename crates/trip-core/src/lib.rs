//! trip-core
//!
//! Share, balance, reconciliation, settlement and report services for trips.
//! Depends on trip-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod balance_service;
pub mod error;
pub mod format;
pub mod provider;
pub mod reconciliation;
pub mod report_service;
pub mod settlement_service;
pub mod share_service;
pub mod validation;

pub use balance_service::*;
pub use error::{CoreError, CoreResult};
pub use format::*;
pub use provider::*;
pub use reconciliation::*;
pub use report_service::*;
pub use settlement_service::*;
pub use share_service::*;
pub use validation::*;
