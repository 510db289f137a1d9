//! Common utilities and types shared across check_prometheus components.

pub mod error;
pub mod logging;

pub use error::{Error, Result, error_chain};
