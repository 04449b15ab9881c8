use serde::ser::{Serialize, SerializeStruct, Serializer};
use unicode_segmentation::UnicodeSegmentation;

/// A position within an editor document.
///
/// Positions are zero-indexed. Column values are counted in grapheme clusters,
/// not bytes or chars, so a Tamil syllable with its vowel sign occupies one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Zero-based index of the block-level node (paragraph, heading, list item).
    pub block: u32,
    /// Zero-based column within the block, in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { block: 0, col: 0 };

    pub fn new(block: u32, col: u32) -> Self {
        Self { block, col }
    }

    /// The position reached after inserting `text` at `self`.
    ///
    /// A line break (`\n` or `\r\n`) starts a new block.
    pub fn advance(self, text: &str) -> Position {
        let mut pos = self;
        for g in text.graphemes(true) {
            if g == "\n" || g == "\r\n" {
                pos.block += 1;
                pos.col = 0;
            } else {
                pos.col += 1;
            }
        }
        pos
    }
}

/// A range of text defined by start and end positions.
///
/// Ranges are half-open intervals [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// An empty range at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The host's current selection.
///
/// `anchor` is where the selection started and `head` is where the caret is.
/// A collapsed selection (`anchor == head`) is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The selected range with `start <= end`.
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.head)
    }
}

/// Screen rectangle of a caret, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Where an external suggestion popup should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Anchor {
    pub top: f32,
    pub left: f32,
}

/// A ranked suggestion produced by the transliteration engine.
///
/// Serializes with `tanglish`/`tamil` aliases next to `input`/`output` so
/// JSON consumers written against the older field names keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suggestion {
    /// Romanized text the suggestion completes.
    pub input: String,
    /// Native-script rendering of `input`.
    pub output: String,
}

impl Suggestion {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Alias of [`Suggestion::input`].
    pub fn tanglish(&self) -> &str {
        &self.input
    }

    /// Alias of [`Suggestion::output`].
    pub fn tamil(&self) -> &str {
        &self.output
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Suggestion", 4)?;
        s.serialize_field("input", &self.input)?;
        s.serialize_field("output", &self.output)?;
        s.serialize_field("tanglish", &self.input)?;
        s.serialize_field("tamil", &self.output)?;
        s.end()
    }
}

/// A single document edit for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Delete text in the specified range.
    Delete { range: Range },
    /// Insert text at the specified position.
    InsertText { at: Position, text: String },
    /// Update the cursor position.
    SetCursor(Position),
}

/// An ordered group of edits the host must apply atomically, as one undo step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub edits: Vec<Edit>,
}

impl Transaction {
    /// Replace `range` with `text` and leave the cursor after the inserted text.
    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = range.start.advance(&text);
        let mut edits = Vec::with_capacity(3);
        if !range.is_empty() {
            edits.push(Edit::Delete { range });
        }
        if !text.is_empty() {
            edits.push(Edit::InsertText {
                at: range.start,
                text,
            });
        }
        edits.push(Edit::SetCursor(cursor));
        Self { edits }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// The plugin's answer to a host input event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// When true the host must skip its default handling of the event.
    pub consumed: bool,
    /// Edits to apply before any default handling runs.
    pub transaction: Option<Transaction>,
}

impl InputOutcome {
    /// Let the host handle the event as if the plugin were absent.
    pub fn pass() -> Self {
        Self::default()
    }

    /// Apply `transaction`, then let default handling run.
    pub fn pass_with(transaction: Transaction) -> Self {
        Self {
            consumed: false,
            transaction: Some(transaction),
        }
    }

    /// Apply `transaction` (if any) and suppress default handling.
    pub fn consumed(transaction: Option<Transaction>) -> Self {
        Self {
            consumed: true,
            transaction,
        }
    }
}

/// Result of an explicitly invoked command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub success: bool,
    pub transaction: Option<Transaction>,
}

impl CommandOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            transaction: None,
        }
    }

    pub fn ok_with(transaction: Transaction) -> Self {
        Self {
            success: true,
            transaction: Some(transaction),
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}
