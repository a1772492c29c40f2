//! Conversions between serenity models and relay entities

use serenity::all::{
    CommandDataOptionValue, CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
    CreateEmbed,
};

use crate::domain::entities::{
    CommandInvocation, CommandSpec, Embed, InvokingUser, OptionKind, OptionValue, OriginGuild,
};

pub fn to_invocation(command: &CommandInteraction, guild_name: Option<String>) -> CommandInvocation {
    let user = InvokingUser {
        id: command.user.id.get().to_string(),
        tag: command.user.tag(),
    };

    let mut invocation = CommandInvocation::new(&command.data.name, user);
    if let Some(guild_id) = command.guild_id {
        invocation = invocation.with_guild(OriginGuild {
            id: guild_id.get().to_string(),
            name: guild_name,
        });
    }

    for option in &command.data.options {
        invocation = invocation.with_option(&option.name, option_value(&option.value));
    }

    invocation
}

pub fn option_value(value: &CommandDataOptionValue) -> OptionValue {
    match value {
        CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
        CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
        CommandDataOptionValue::Number(n) => OptionValue::Number(*n),
        CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
        _ => OptionValue::Other,
    }
}

pub fn to_create_command(spec: &CommandSpec) -> CreateCommand {
    spec.options.iter().fold(
        CreateCommand::new(&spec.name).description(&spec.description),
        |command, option| {
            let kind = match option.kind {
                OptionKind::String => CommandOptionType::String,
                OptionKind::Integer => CommandOptionType::Integer,
            };
            command.add_option(
                CreateCommandOption::new(kind, &option.name, &option.description).required(option.required),
            )
        },
    )
}

pub fn to_create_embed(embed: &Embed) -> CreateEmbed {
    CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .color(embed.color)
}
