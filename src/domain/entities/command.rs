use serde::{Deserialize, Serialize};

use super::parameters::{COUNT_OPTION, LANG_OPTION, TOPIC_OPTION};

/// Which command form the relay exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandVariant {
    #[default]
    Research,
    Start,
}

impl CommandVariant {
    pub fn command_name(&self) -> &'static str {
        match self {
            CommandVariant::Research => "research",
            CommandVariant::Start => "start",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
}

/// A typed option on a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    pub required: bool,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            required: false,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Represents a slash command schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn research() -> Self {
        Self::new(CommandVariant::Research.command_name())
            .with_description("Send research parameters to target URL")
            .with_option(
                CommandOption::new(TOPIC_OPTION, OptionKind::String)
                    .with_description("The trend topic to research")
                    .required(),
            )
            .with_option(
                CommandOption::new(COUNT_OPTION, OptionKind::Integer)
                    .with_description("The count parameter (default: 1)"),
            )
            .with_option(
                CommandOption::new(LANG_OPTION, OptionKind::String)
                    .with_description("The language parameter (default: english)"),
            )
    }

    pub fn start() -> Self {
        Self::new(CommandVariant::Start.command_name()).with_description("Send a request to target URL")
    }

    pub fn for_variant(variant: CommandVariant) -> Self {
        match variant {
            CommandVariant::Research => Self::research(),
            CommandVariant::Start => Self::start(),
        }
    }
}
