//! toolman library - expose modules for testing
//!
//! The binary in `main.rs` is a thin wrapper around [`commands::run`].

pub mod commands;
pub mod common;
pub mod errors;
pub mod installer;

pub use common::{GlobalOpts, Mode, RunConfig};
pub use toolman_logger as logger;
