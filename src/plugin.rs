use std::fmt;

use tracing::{debug, trace};

use crate::command::{Command, CommandKind, CommandRegistry};
use crate::key::{KeyBinding, KeyBindingError, KeyCode, KeyEvent, Modifiers};
use crate::traits::{EditorPlugin, SuggestionSink, TextOps, Transliterator};
use crate::types::{Anchor, CommandOutcome, InputOutcome, Range, Selection, Suggestion, Transaction};
use crate::word::current_word;

/// Characters that finalize the word before them: space and line break.
pub const DEFAULT_TRIGGER_CHARS: [char; 2] = [' ', '\n'];
pub const DEFAULT_MIN_SUGGESTION_LEN: usize = 2;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Vertical gap between the caret's bottom edge and the suggestion popup.
const ANCHOR_OFFSET: f32 = 5.0;

/// Transliterates romanized words into native script as the user types.
///
/// One instance belongs to one editor. The host drives it through
/// [`EditorPlugin`] and applies the transactions it returns.
pub struct Plugin<E: Transliterator> {
    enabled: bool,
    language: Option<E::Config>,
    engine: Option<E>,
    trigger_chars: Vec<char>,
    min_suggestion_len: usize,
    max_suggestions: usize,
    toggle_key: KeyBinding,
    sink: Option<Box<dyn SuggestionSink>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSnapshot {
    pub enabled: bool,
    pub attached: bool,
    pub trigger_chars: Vec<char>,
    pub min_suggestion_len: usize,
    pub max_suggestions: usize,
    pub toggle_key: KeyBinding,
}

pub struct PluginBuilder<E: Transliterator> {
    enabled: bool,
    language: Option<E::Config>,
    trigger_chars: Vec<char>,
    min_suggestion_len: usize,
    max_suggestions: usize,
    toggle_key: KeyBinding,
    sink: Option<Box<dyn SuggestionSink>>,
}

impl<E: Transliterator> Default for PluginBuilder<E> {
    fn default() -> Self {
        Self {
            enabled: false,
            language: None,
            trigger_chars: DEFAULT_TRIGGER_CHARS.to_vec(),
            min_suggestion_len: DEFAULT_MIN_SUGGESTION_LEN,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            toggle_key: KeyBinding::toggle_default(),
            sink: None,
        }
    }
}

impl<E: Transliterator> PluginBuilder<E> {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Language configuration handed to the engine on attach.
    pub fn language(mut self, config: E::Config) -> Self {
        self.language = Some(config);
        self
    }

    pub fn trigger_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.trigger_chars = chars.into_iter().collect();
        self
    }

    /// Shortest word, in grapheme clusters, that gets suggestions.
    pub fn min_suggestion_len(mut self, len: usize) -> Self {
        self.min_suggestion_len = len;
        self
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    pub fn toggle_binding(mut self, binding: KeyBinding) -> Self {
        self.toggle_key = binding;
        self
    }

    /// Parses a shortcut such as `"Mod-Shift-t"` for the toggle command.
    pub fn toggle_shortcut(mut self, shortcut: &str) -> Result<Self, KeyBindingError> {
        self.toggle_key = shortcut.parse()?;
        Ok(self)
    }

    pub fn on_suggestions(mut self, sink: impl SuggestionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Plugin<E> {
        Plugin {
            enabled: self.enabled,
            language: self.language,
            engine: None,
            trigger_chars: self.trigger_chars,
            min_suggestion_len: self.min_suggestion_len,
            max_suggestions: self.max_suggestions,
            toggle_key: self.toggle_key,
            sink: self.sink,
        }
    }
}

impl<E: Transliterator> fmt::Debug for Plugin<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("enabled", &self.enabled)
            .field("attached", &self.engine.is_some())
            .field("trigger_chars", &self.trigger_chars)
            .field("min_suggestion_len", &self.min_suggestion_len)
            .field("max_suggestions", &self.max_suggestions)
            .field("toggle_key", &self.toggle_key)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl<E: Transliterator> Plugin<E> {
    pub fn builder() -> PluginBuilder<E> {
        PluginBuilder::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn snapshot(&self) -> PluginSnapshot {
        PluginSnapshot {
            enabled: self.enabled,
            attached: self.engine.is_some(),
            trigger_chars: self.trigger_chars.clone(),
            min_suggestion_len: self.min_suggestion_len,
            max_suggestions: self.max_suggestions,
            toggle_key: self.toggle_key,
        }
    }

    /// Sets the toggle. Disabling always hides any visible suggestions.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        debug!(enabled, "transliteration toggled");
        if !enabled {
            self.clear_suggestions();
        }
        true
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled)
    }

    /// Adds this plugin's commands to the host's namespace.
    pub fn register_commands(&self, registry: &mut CommandRegistry) {
        for kind in [
            CommandKind::SetEnabled,
            CommandKind::Toggle,
            CommandKind::TransliterateSelection,
            CommandKind::ApplySuggestion,
        ] {
            if !registry.register(kind) {
                debug!(name = kind.name(), "command already registered");
            }
        }
    }

    pub fn execute<T: TextOps>(
        &mut self,
        doc: &T,
        selection: Selection,
        command: Command,
    ) -> CommandOutcome {
        match command {
            Command::SetEnabled(on) => CommandOutcome {
                success: self.set_enabled(on),
                transaction: None,
            },
            Command::Toggle => CommandOutcome {
                success: self.toggle(),
                transaction: None,
            },
            Command::TransliterateSelection => self.transliterate_selection(doc, selection),
            Command::ApplySuggestion(output) => self.apply_suggestion(doc, selection, &output),
        }
    }

    /// Replaces the selected text with its transliteration.
    ///
    /// Works whether or not the toggle is on; it only needs an engine.
    pub fn transliterate_selection<T: TextOps>(
        &self,
        doc: &T,
        selection: Selection,
    ) -> CommandOutcome {
        let Some(engine) = self.engine.as_ref() else {
            return CommandOutcome::failed();
        };
        if selection.is_empty() {
            return CommandOutcome::failed();
        }
        let range = selection.range();
        let text = doc.slice_to_string(range);
        let output = engine.transliterate(&text);
        if output == text {
            trace!("selection unchanged by transliteration");
            return CommandOutcome::failed();
        }
        debug!(input = %text, output = %output, "transliterated selection");
        CommandOutcome::ok_with(Transaction::replace(range, output))
    }

    /// Replaces the current word with a picked suggestion plus one space.
    pub fn apply_suggestion<T: TextOps>(
        &mut self,
        doc: &T,
        selection: Selection,
        output: &str,
    ) -> CommandOutcome {
        if self.active_engine().is_none() || output.is_empty() || !selection.is_empty() {
            return CommandOutcome::failed();
        }
        let Some(word) = current_word(doc, selection.head) else {
            return CommandOutcome::failed();
        };
        debug!(word = %word.text, output, "applied suggestion");
        self.clear_suggestions();
        CommandOutcome::ok_with(Transaction::replace(word.range, format!("{output} ")))
    }

    fn active_engine(&self) -> Option<&E> {
        if self.enabled {
            self.engine.as_ref()
        } else {
            None
        }
    }

    fn notify(&mut self, suggestions: &[Suggestion], anchor: Option<Anchor>) {
        if let Some(sink) = self.sink.as_mut() {
            sink.update(suggestions, anchor);
        }
    }

    fn clear_suggestions(&mut self) {
        self.notify(&[], None);
    }

    /// Ranked suggestions for the word at the caret, or `None` when nothing
    /// should be shown.
    fn suggestions_at<T: TextOps>(
        &self,
        doc: &T,
        selection: Selection,
    ) -> Option<Vec<Suggestion>> {
        let engine = self.active_engine()?;
        if !selection.is_empty() {
            return None;
        }
        let word = current_word(doc, selection.head)?;
        if word.len() < self.min_suggestion_len || engine.contains_target_script(&word.text) {
            return None;
        }
        let mut list = engine.suggestions(&word.text, self.max_suggestions);
        list.truncate(self.max_suggestions);
        if list.is_empty() { None } else { Some(list) }
    }

    /// Enter commits the line. Transliterate the word before it unless a
    /// suggestion popup is probably showing, in which case the popup owns Enter.
    fn finalize_on_enter<T: TextOps>(
        &self,
        doc: &T,
        selection: Selection,
        key: KeyEvent,
    ) -> InputOutcome {
        let Some(engine) = self.active_engine() else {
            return InputOutcome::pass();
        };
        if !selection.is_empty()
            || key
                .mods
                .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return InputOutcome::pass();
        }
        let Some(word) = current_word(doc, selection.head) else {
            return InputOutcome::pass();
        };

        // Popup visibility is inferred from suggestion availability, not
        // reported by the UI.
        if word.len() >= self.min_suggestion_len && !engine.suggestions(&word.text, 1).is_empty()
        {
            debug!(word = %word.text, "suggestions available; leaving Enter to the popup");
            return InputOutcome::pass();
        }
        if engine.contains_target_script(&word.text) {
            return InputOutcome::pass();
        }
        let output = engine.transliterate(&word.text);
        if output == word.text {
            return InputOutcome::pass();
        }
        debug!(word = %word.text, output = %output, "transliterated on Enter");
        InputOutcome::pass_with(Transaction::replace(word.range, output))
    }
}

impl<E: Transliterator> EditorPlugin for Plugin<E> {
    type Error = E::Error;

    fn on_attach(&mut self) -> Result<(), E::Error> {
        if self.engine.is_some() {
            return Ok(());
        }
        match self.language.as_ref() {
            Some(config) => {
                self.engine = Some(E::from_config(config)?);
                debug!("transliteration engine attached");
            }
            None => debug!("no language configured; plugin stays inert"),
        }
        Ok(())
    }

    fn on_detach(&mut self) {
        self.engine = None;
        self.clear_suggestions();
    }

    fn on_text_input<T: TextOps>(&mut self, doc: &T, range: Range, text: &str) -> InputOutcome {
        let mut chars = text.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return InputOutcome::pass();
        };
        let Some(engine) = self.active_engine() else {
            return InputOutcome::pass();
        };
        if !self.trigger_chars.contains(&ch) {
            return InputOutcome::pass();
        }
        let Some(word) = current_word(doc, range.start) else {
            trace!("trigger without a preceding word");
            return InputOutcome::pass();
        };
        if engine.contains_target_script(&word.text) {
            trace!(word = %word.text, "already in target script");
            return InputOutcome::pass();
        }
        let output = engine.transliterate(&word.text);
        if output == word.text {
            trace!(word = %word.text, "transliteration is a no-op");
            return InputOutcome::pass();
        }

        debug!(word = %word.text, output = %output, "transliterated on trigger");
        // The replacement carries the trigger, so the default insertion is skipped.
        let tx = Transaction::replace(
            Range::new(word.range.start, range.end),
            format!("{output}{ch}"),
        );
        self.clear_suggestions();
        InputOutcome::consumed(Some(tx))
    }

    fn on_key_down<T: TextOps>(
        &mut self,
        doc: &T,
        selection: Selection,
        key: KeyEvent,
    ) -> InputOutcome {
        if self.toggle_key.matches(&key) {
            self.toggle();
            return InputOutcome::consumed(None);
        }
        match key.code {
            KeyCode::Enter => self.finalize_on_enter(doc, selection, key),
            _ => InputOutcome::pass(),
        }
    }

    fn on_document_changed<T: TextOps>(&mut self, doc: &T, selection: Selection) {
        if self.sink.is_none() || self.active_engine().is_none() {
            return;
        }
        let shown = self.suggestions_at(doc, selection).and_then(|list| {
            let rect = doc.coords_at(selection.head)?;
            let anchor = Anchor {
                top: rect.bottom + ANCHOR_OFFSET,
                left: rect.left,
            };
            Some((list, anchor))
        });
        match shown {
            Some((list, anchor)) => {
                trace!(count = list.len(), "showing suggestions");
                self.notify(&list, Some(anchor));
            }
            None => self.clear_suggestions(),
        }
    }
}
