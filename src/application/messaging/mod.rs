//! Messaging - routing invocations and composing replies

pub mod dispatcher;
pub mod reply;

pub use dispatcher::{InvocationDispatcher, INTERACTION_TTL};
