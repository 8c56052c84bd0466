use std::collections::HashMap;
use std::sync::LazyLock;

use compact_str::CompactString;

use super::{error::RuntimeErrorKind, ActionSink};
use crate::parser::statement::Arguments;

pub const PATH_KEY: &str = "パス";

/// Signature shared by every command action.
pub type CommandAction = fn(&CommandArguments<'_>, &mut dyn ActionSink) -> Result<(), RuntimeErrorKind>;

/// One entry of the command table.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub action: CommandAction,
}

/// Every command a script may call. New commands are added here and nowhere
/// else.
const COMMAND_TABLE: &[Command] = &[
    Command {
        name: "マウス入力を無効化",
        required: &[],
        optional: &[],
        action: |_, actions| {
            actions.set_input_blocked(true);
            Ok(())
        },
    },
    Command {
        name: "マウス入力を有効化",
        required: &[],
        optional: &[],
        action: |_, actions| {
            actions.set_input_blocked(false);
            Ok(())
        },
    },
    Command {
        name: "アプリケーションを開く",
        required: &[PATH_KEY],
        optional: &[],
        action: |arguments, actions| {
            actions.open_path(arguments.require(PATH_KEY)?);
            Ok(())
        },
    },
];

pub static COMMANDS: LazyLock<HashMap<&'static str, Command>> = LazyLock::new(|| {
    COMMAND_TABLE
        .iter()
        .map(|command| (command.name, *command))
        .collect()
});

pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.get(name)
}

impl Command {
    /// Checks that every required key is present before anything runs.
    pub fn check(&self, arguments: &CommandArguments<'_>) -> Result<(), RuntimeErrorKind> {
        for key in self.required.iter().copied() {
            arguments.require(key)?;
        }
        Ok(())
    }

    pub fn accepts(&self, key: &str) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }
}

/// Argument values of one command call, already reduced to text.
#[derive(Debug)]
pub struct CommandArguments<'a> {
    command: &'a str,
    values: Vec<(&'a str, &'a str)>,
}

impl<'a> CommandArguments<'a> {
    pub fn resolve(command: &'a str, arguments: &'a Arguments) -> Self {
        Self {
            command,
            values: arguments
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_argument_text()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| *value)
    }

    pub fn require(&self, key: &'static str) -> Result<&'a str, RuntimeErrorKind> {
        self.get(key).ok_or_else(|| RuntimeErrorKind::MissingArgument {
            command: CompactString::from(self.command),
            key,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values.iter().map(|(key, _)| *key)
    }
}
