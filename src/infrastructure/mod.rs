//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: environment and YAML configuration
//! - Logging: the structured relay log
//! - Http: the outbound backend client
//! - Adapters: platform integrations (Discord, console)

pub mod adapters;
pub mod config;
pub mod http;
pub mod logging;
