//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod invocation;
pub mod outcome;
pub mod parameters;
pub mod request;

pub use command::{CommandSpec, CommandVariant, OptionKind};
pub use invocation::{CommandInvocation, InvokingUser, OptionValue, OriginGuild};
pub use outcome::{Embed, RelayOutcome, RelayState, Reply, ReplyBody};
pub use parameters::RelayParameters;
pub use request::{Credentials, OutboundRequest, RequestBody};
