use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// A typed command option value as delivered by the platform
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Other,
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// The user who triggered an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokingUser {
    pub id: String,
    pub tag: String,
}

/// The guild an invocation came from; absent for direct messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginGuild {
    pub id: String,
    pub name: Option<String>,
}

/// A single use of a registered command
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub id: String,
    pub command_name: String,
    pub user: InvokingUser,
    pub guild: Option<OriginGuild>,
    pub parameters: HashMap<String, OptionValue>,
    pub received_at: DateTime<Utc>,
}

impl CommandInvocation {
    pub fn new(command_name: impl Into<String>, user: InvokingUser) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            command_name: command_name.into(),
            user,
            guild: None,
            parameters: HashMap::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_guild(mut self, guild: OriginGuild) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.parameters.get(name)
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (guild_name, guild_id) = match &self.guild {
            Some(guild) => (guild.name.as_deref().unwrap_or("DM"), guild.id.as_str()),
            None => ("DM", "N/A"),
        };
        write!(
            f,
            "Command \"{}\" used by {} ({}) in guild {} ({})",
            self.command_name, self.user.tag, self.user.id, guild_name, guild_id
        )
    }
}
