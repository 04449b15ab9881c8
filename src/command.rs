use std::collections::BTreeMap;

/// Commands the plugin exposes to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Turn transliteration on or off.
    SetEnabled(bool),
    Toggle,
    /// Transliterate the selected text in place.
    TransliterateSelection,
    /// Replace the current word with a suggestion the user picked.
    ApplySuggestion(String),
}

/// The argument-free identity of a [`Command`], as stored in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SetEnabled,
    Toggle,
    TransliterateSelection,
    ApplySuggestion,
}

/// Argument passed alongside a command invoked by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    None,
    Flag(bool),
    Text(String),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SetEnabled(_) => CommandKind::SetEnabled,
            Command::Toggle => CommandKind::Toggle,
            Command::TransliterateSelection => CommandKind::TransliterateSelection,
            Command::ApplySuggestion(_) => CommandKind::ApplySuggestion,
        }
    }

    /// Builds a command from its kind and argument.
    ///
    /// Returns `None` when the argument does not fit the kind.
    pub fn from_kind(kind: CommandKind, arg: CommandArg) -> Option<Command> {
        match (kind, arg) {
            (CommandKind::SetEnabled, CommandArg::Flag(on)) => Some(Command::SetEnabled(on)),
            (CommandKind::Toggle, CommandArg::None) => Some(Command::Toggle),
            (CommandKind::TransliterateSelection, CommandArg::None) => {
                Some(Command::TransliterateSelection)
            }
            (CommandKind::ApplySuggestion, CommandArg::Text(output)) => {
                Some(Command::ApplySuggestion(output))
            }
            _ => None,
        }
    }
}

impl CommandKind {
    /// Name the command is registered under.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::SetEnabled => "setTransliteration",
            CommandKind::Toggle => "toggleTransliteration",
            CommandKind::TransliterateSelection => "transliterateSelection",
            CommandKind::ApplySuggestion => "applyTransliterationSuggestion",
        }
    }
}

/// The host's command namespace.
///
/// Plugins add their commands at registration time; the host resolves
/// user-invoked names through it.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandKind>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `kind` under its name. Returns false if the name was taken.
    pub fn register(&mut self, kind: CommandKind) -> bool {
        let name = kind.name();
        if self.commands.contains_key(name) {
            return false;
        }
        self.commands.insert(name, kind);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<CommandKind> {
        self.commands.get(name).copied()
    }

    /// Resolves `name` and `arg` into a runnable command.
    pub fn resolve(&self, name: &str, arg: CommandArg) -> Option<Command> {
        Command::from_kind(self.lookup(name)?, arg)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
