//! Application services - relay and command registration

pub mod registrar;
pub mod relay_service;

pub use registrar::CommandRegistrar;
pub use relay_service::{RelayContext, RelayReport, RelayService, RelaySettings};
