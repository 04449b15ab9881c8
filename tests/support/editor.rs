use translit_plugin::{
    Command, CommandOutcome, EditorPlugin, InputOutcome, KeyCode, KeyEvent, Plugin, Position,
    PluginBuilder, Range, Selection, Transaction,
};

use super::mock_buffer::MockBuffer;
use super::mock_engine::{MockEngine, MockLanguage};

pub fn tamil_plugin() -> PluginBuilder<MockEngine> {
    Plugin::builder().language(MockLanguage::tamil())
}

/// Minimal host: routes input through the plugin the way an editor view would.
pub struct Editor {
    pub buf: MockBuffer,
    pub cursor: Position,
    pub plugin: Plugin<MockEngine>,
}

impl Editor {
    pub fn new(plugin: Plugin<MockEngine>) -> Self {
        Self::with_text("", plugin)
    }

    pub fn with_text(text: &str, mut plugin: Plugin<MockEngine>) -> Self {
        plugin.on_attach().expect("mock language attaches");
        let buf = MockBuffer::new(text);
        let cursor = buf.end();
        Self {
            buf,
            cursor,
            plugin,
        }
    }

    pub fn text(&self) -> String {
        self.buf.text()
    }

    pub fn selection(&self) -> Selection {
        Selection::caret(self.cursor)
    }

    fn apply(&mut self, tx: Option<&Transaction>) {
        if let Some(tx) = tx
            && let Some(cursor) = self.buf.apply(tx)
        {
            self.cursor = cursor;
        }
    }

    pub fn type_char(&mut self, ch: char) -> InputOutcome {
        if ch == '\n' {
            return self.press(KeyEvent::plain(KeyCode::Enter));
        }
        let text = ch.to_string();
        let outcome = self
            .plugin
            .on_text_input(&self.buf, Range::caret(self.cursor), &text);
        self.apply(outcome.transaction.as_ref());
        if !outcome.consumed {
            self.cursor = self.buf.insert(self.cursor, &text);
        }
        let selection = self.selection();
        self.plugin.on_document_changed(&self.buf, selection);
        outcome
    }

    pub fn type_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.type_char(ch);
        }
    }

    /// Key-down with default handling: Enter splits the block.
    pub fn press(&mut self, key: KeyEvent) -> InputOutcome {
        let selection = self.selection();
        let outcome = self.plugin.on_key_down(&self.buf, selection, key);
        let mut changed = outcome.transaction.is_some();
        self.apply(outcome.transaction.as_ref());
        if !outcome.consumed && key.code == KeyCode::Enter {
            self.cursor = self.buf.insert(self.cursor, "\n");
            changed = true;
        }
        if changed {
            let selection = self.selection();
            self.plugin.on_document_changed(&self.buf, selection);
        }
        outcome
    }

    pub fn run(&mut self, selection: Selection, command: Command) -> CommandOutcome {
        let outcome = self.plugin.execute(&self.buf, selection, command);
        self.apply(outcome.transaction.as_ref());
        outcome
    }
}
