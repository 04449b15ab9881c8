pub mod command;
pub mod key;
pub mod plugin;
pub mod standalone;
pub mod traits;
pub mod types;
pub mod word;

pub use crate::command::{Command, CommandArg, CommandKind, CommandRegistry};
pub use crate::key::{KeyBinding, KeyBindingError, KeyCode, KeyEvent, Modifiers};
pub use crate::plugin::{Plugin, PluginBuilder, PluginSnapshot};
pub use crate::standalone::{StandaloneTransliterator, create_transliterator};
pub use crate::traits::{EditorPlugin, SuggestionSink, TextOps, Transliterator};
pub use crate::types::{
    Anchor, CommandOutcome, Edit, InputOutcome, Position, Range, Rect, Selection, Suggestion,
    Transaction,
};
pub use crate::word::{Word, current_word, word_before};
