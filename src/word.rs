//! Locating the word the user is currently typing.
//!
//! A word is the maximal run of grapheme clusters before the cursor that are
//! neither whitespace nor an inline-object placeholder.

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextOps;
use crate::types::{Position, Range};

/// Stand-in for inline non-text nodes in [`TextOps::block_text`].
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// A word located in a block, in grapheme columns `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    pub start: u32,
    pub end: u32,
    pub text: &'a str,
}

/// The current word, resolved against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub range: Range,
}

impl Word {
    /// Length in grapheme clusters.
    pub fn len(&self) -> usize {
        self.range.end.col.saturating_sub(self.range.start.col) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// True if `grapheme` ends a word: whitespace or an inline object.
pub fn is_word_boundary(grapheme: &str) -> bool {
    grapheme.starts_with(|c: char| c.is_whitespace() || c == OBJECT_REPLACEMENT)
}

/// The trailing word of `text[..offset]`, with `offset` in grapheme columns.
///
/// Returns `None` when the prefix is empty or ends on a boundary. Offsets past
/// the end of `text` are clamped.
pub fn word_before(text: &str, offset: u32) -> Option<WordSpan<'_>> {
    let mut col = 0u32;
    let mut start_col = 0u32;
    let mut start_byte = 0usize;
    let mut end_byte = 0usize;

    for (idx, g) in text.grapheme_indices(true) {
        if col == offset {
            break;
        }
        col += 1;
        end_byte = idx + g.len();
        if is_word_boundary(g) {
            start_col = col;
            start_byte = end_byte;
        }
    }

    if start_byte == end_byte {
        return None;
    }
    Some(WordSpan {
        start: start_col,
        end: col,
        text: &text[start_byte..end_byte],
    })
}

/// The word ending at `cursor`, if any.
pub fn current_word<T: TextOps>(doc: &T, cursor: Position) -> Option<Word> {
    let text = doc.block_text(cursor.block);
    let span = word_before(&text, cursor.col)?;
    Some(Word {
        text: span.text.to_string(),
        range: Range {
            start: Position::new(cursor.block, span.start),
            end: Position::new(cursor.block, span.end),
        },
    })
}
