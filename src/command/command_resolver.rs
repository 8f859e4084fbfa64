use crate::arg::args::Arg;
use crate::command::commands::{
    CommandDyn, ConfigCommand, LogCommand, ManCommand, ManifestCommand,
};
use crate::core::types::{GlobalCommand, ManifestAction, TypeHelpCommand};
use crate::errors::Result;

pub trait CommandResolver {
    fn can_resolve(&self, command: &str) -> bool;
    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>>;
}

/// check / show / export — everything that reads a manifest.
pub struct ManifestActionResolver;

impl CommandResolver for ManifestActionResolver {
    fn can_resolve(&self, command: &str) -> bool {
        ManifestAction::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let action = ManifestAction::try_from(command)?;
        Ok(Box::new(ManifestCommand::new(action, args)))
    }
}

pub struct GlobalResolver;

impl CommandResolver for GlobalResolver {
    fn can_resolve(&self, command: &str) -> bool {
        GlobalCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let command_type = GlobalCommand::try_from(command)?;
        match command_type {
            GlobalCommand::Config => Ok(Box::new(ConfigCommand::new(args))),
            GlobalCommand::Log => Ok(Box::new(LogCommand::new(args))),
            GlobalCommand::Man => Ok(Box::new(ManCommand::new(args))),
        }
    }
}

pub struct TypeHelpResolver;

impl CommandResolver for TypeHelpResolver {
    fn can_resolve(&self, command: &str) -> bool {
        TypeHelpCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let command_type = TypeHelpCommand::try_from(command)?;
        Ok(Box::new(crate::command::commands::TypeHelpCommand::new(
            args,
            command_type,
        )))
    }
}
