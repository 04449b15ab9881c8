use ropey::Rope;
use translit_plugin::traits::TextOps;
use translit_plugin::types::{Edit, Position, Range, Rect, Transaction};
use unicode_segmentation::UnicodeSegmentation;

pub const LINE_HEIGHT: f32 = 20.0;
pub const CHAR_WIDTH: f32 = 8.0;

/// Rope-backed document where every line is one block.
pub struct MockBuffer {
    rope: Rope,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn line_str(&self, line: u32) -> String {
        if line as usize >= self.rope.len_lines() {
            return String::new();
        }
        let mut s = self.rope.line(line as usize).to_string();
        // Remove trailing newline if present
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    /// Position at the very end of the document.
    pub fn end(&self) -> Position {
        let last = self.rope.len_lines().saturating_sub(1) as u32;
        Position::new(last, self.line_str(last).graphemes(true).count() as u32)
    }

    fn char_idx(&self, pos: Position) -> usize {
        if pos.block as usize >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(pos.block as usize);
        let offset: usize = self
            .line_str(pos.block)
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        line_start + offset
    }

    /// Applies a transaction and returns the cursor it leaves behind, if any.
    pub fn apply(&mut self, tx: &Transaction) -> Option<Position> {
        let mut cursor = None;
        for edit in &tx.edits {
            match edit {
                Edit::Delete { range } => {
                    let start = self.char_idx(range.start);
                    let end = self.char_idx(range.end);
                    self.rope.remove(start..end);
                }
                Edit::InsertText { at, text } => {
                    let idx = self.char_idx(*at);
                    self.rope.insert(idx, text);
                }
                Edit::SetCursor(pos) => cursor = Some(*pos),
            }
        }
        cursor
    }

    pub fn insert(&mut self, at: Position, text: &str) -> Position {
        let idx = self.char_idx(at);
        self.rope.insert(idx, text);
        at.advance(text)
    }
}

impl TextOps for MockBuffer {
    fn block_text(&self, block: u32) -> String {
        self.line_str(block)
    }

    fn slice_to_string(&self, range: Range) -> String {
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end);
        self.rope.slice(start..end).to_string()
    }

    fn coords_at(&self, pos: Position) -> Option<Rect> {
        if pos.block as usize >= self.rope.len_lines() {
            return None;
        }
        let top = pos.block as f32 * LINE_HEIGHT;
        let left = pos.col as f32 * CHAR_WIDTH;
        Some(Rect {
            top,
            bottom: top + LINE_HEIGHT,
            left,
            right: left + CHAR_WIDTH,
        })
    }
}
