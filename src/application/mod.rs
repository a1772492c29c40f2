//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: bot, relay and config errors
//! - Services: the request relay and command registration
//! - Messaging: invocation dispatch and reply composition

pub mod errors;
pub mod messaging;
pub mod services;
