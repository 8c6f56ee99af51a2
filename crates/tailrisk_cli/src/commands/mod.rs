//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod analyse;
pub mod check_config;
