//! Domain layer - Core relay types with no I/O
//!
//! This layer contains:
//! - Entities: invocations, parameters, outbound requests, outcomes, replies
//! - Traits: seams for the backend, the reply channel and command publishing

pub mod entities;
pub mod traits;
