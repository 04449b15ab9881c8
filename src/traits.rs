use crate::key::KeyEvent;
use crate::types::{Anchor, InputOutcome, Position, Range, Rect, Selection, Suggestion};

/// Read-only view of the host editor's document.
pub trait TextOps {
    /// Full text of a block-level node.
    ///
    /// Inline non-text nodes (images, mentions) must be rendered as a single
    /// U+FFFC OBJECT REPLACEMENT CHARACTER so columns stay aligned.
    fn block_text(&self, block: u32) -> String;

    /// Extract text from a range, possibly spanning blocks.
    fn slice_to_string(&self, range: Range) -> String;

    /// Screen rectangle of the caret at `pos`, if the host has laid it out.
    fn coords_at(&self, pos: Position) -> Option<Rect>;
}

/// The romanized-to-native transliteration engine.
///
/// Implementations are expected to be pure and synchronous: the same input
/// always yields the same output and no call has side effects.
pub trait Transliterator: Sized {
    /// Opaque language configuration the engine is built from.
    type Config;
    /// Whatever the engine reports when the configuration is unusable.
    type Error;

    fn from_config(config: &Self::Config) -> Result<Self, Self::Error>;

    fn transliterate(&self, text: &str) -> String;

    /// Ranked completions for a partial romanized `query`, best first.
    fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion>;

    /// True if `text` already contains characters of the target script.
    fn contains_target_script(&self, text: &str) -> bool;
}

/// Receives suggestion list updates for an external popup.
///
/// An empty list with no anchor means "hide the popup".
pub trait SuggestionSink {
    fn update(&mut self, suggestions: &[Suggestion], anchor: Option<Anchor>);
}

impl<F> SuggestionSink for F
where
    F: FnMut(&[Suggestion], Option<Anchor>),
{
    fn update(&mut self, suggestions: &[Suggestion], anchor: Option<Anchor>) {
        self(suggestions, anchor)
    }
}

/// Lifecycle hooks the host editor calls into.
///
/// Every hook runs synchronously inside the host's event handling. The host
/// applies any returned transaction before it commits, and calls
/// `on_document_changed` only after a transaction has been applied.
pub trait EditorPlugin {
    type Error;

    fn on_attach(&mut self) -> Result<(), Self::Error>;

    fn on_detach(&mut self);

    /// Text is about to be inserted over `range`.
    fn on_text_input<T: TextOps>(&mut self, doc: &T, range: Range, text: &str) -> InputOutcome;

    fn on_key_down<T: TextOps>(
        &mut self,
        doc: &T,
        selection: Selection,
        key: KeyEvent,
    ) -> InputOutcome;

    /// Called after every applied transaction, including selection-only ones.
    fn on_document_changed<T: TextOps>(&mut self, doc: &T, selection: Selection);
}
