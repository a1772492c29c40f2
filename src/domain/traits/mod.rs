//! Domain traits - Abstractions for infrastructure implementations

pub mod backend;
pub mod publisher;
pub mod responder;

pub use backend::{Backend, BackendResponse};
pub use publisher::CommandPublisher;
pub use responder::Responder;
