//! Logging setup.
//!
//! The crate itself only talks to the `log` facade. This module installs an
//! `env_logger` backend for applications and tests that have none.

mod init;

pub use init::{init_logging, LoggingConfig};
