//! Terminal UI demo using crossterm and ratatui.
//!
//! Type romanized Tamil; words are converted when you press space or Enter.
//! Run with: cargo run --example tui_crossterm
//!
//! Keys: Ctrl+T toggles transliteration, Tab accepts the first suggestion,
//! Ctrl+L transliterates the whole current line, Esc quits.

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect as Area},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use ropey::Rope;
use std::cell::RefCell;
use std::convert::Infallible;
use std::io;
use std::rc::Rc;
use translit_plugin::{
    Anchor, Command, EditorPlugin, KeyCode, KeyEvent, Modifiers, Plugin, Position, Range,
    Selection, Suggestion, TextOps, Transliterator,
    types::{Edit, Rect, Transaction},
};
use unicode_segmentation::UnicodeSegmentation;

/// A handful of words is enough to show the plugin at work.
struct DemoEngine {
    entries: Vec<(&'static str, &'static str)>,
}

impl Transliterator for DemoEngine {
    type Config = ();
    type Error = Infallible;

    fn from_config(_: &()) -> Result<Self, Infallible> {
        Ok(Self {
            entries: vec![
                ("amma", "அம்மா"),
                ("appa", "அப்பா"),
                ("naan", "நான்"),
                ("nandri", "நன்றி"),
                ("tamil", "தமிழ்"),
                ("vaanam", "வானம்"),
                ("vanakkam", "வணக்கம்"),
                ("vanam", "வனம்"),
                ("vandi", "வண்டி"),
            ],
        })
    }

    fn transliterate(&self, text: &str) -> String {
        text.split(' ')
            .map(|w| {
                self.entries
                    .iter()
                    .find(|(i, _)| *i == w)
                    .map_or(w, |(_, o)| *o)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        self.entries
            .iter()
            .filter(|(i, _)| i.starts_with(query))
            .take(limit)
            .map(|(i, o)| Suggestion::new(*i, *o))
            .collect()
    }

    fn contains_target_script(&self, text: &str) -> bool {
        text.chars().any(|c| ('\u{0B80}'..='\u{0BFF}').contains(&c))
    }
}

/// Text buffer implementation using ropey; one line per block.
struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    fn line_text(&self, line: u32) -> String {
        if line < self.rope.len_lines() as u32 {
            self.rope
                .line(line as usize)
                .to_string()
                .trim_end_matches('\n')
                .to_string()
        } else {
            String::new()
        }
    }

    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn position_to_char_idx(&self, pos: Position) -> usize {
        if pos.block >= self.line_count() {
            return self.rope.len_chars();
        }
        let offset: usize = self
            .line_text(pos.block)
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        self.rope.line_to_char(pos.block as usize) + offset
    }

    /// Applies a transaction and returns the cursor it leaves behind, if any.
    fn apply(&mut self, tx: &Transaction) -> Option<Position> {
        let mut cursor = None;
        for edit in &tx.edits {
            match edit {
                Edit::Delete { range } => {
                    let start = self.position_to_char_idx(range.start);
                    let end = self.position_to_char_idx(range.end);
                    self.rope.remove(start..end);
                }
                Edit::InsertText { at, text } => {
                    let idx = self.position_to_char_idx(*at);
                    self.rope.insert(idx, text);
                }
                Edit::SetCursor(pos) => cursor = Some(*pos),
            }
        }
        cursor
    }
}

impl TextOps for RopeBuffer {
    fn block_text(&self, block: u32) -> String {
        self.line_text(block)
    }

    fn slice_to_string(&self, range: Range) -> String {
        let start = self.position_to_char_idx(range.start);
        let end = self.position_to_char_idx(range.end);
        self.rope.slice(start..end).to_string()
    }

    fn coords_at(&self, pos: Position) -> Option<Rect> {
        // Terminal cells: one row per block, one column per grapheme
        let top = pos.block as f32;
        let left = pos.col as f32;
        Some(Rect {
            top,
            bottom: top,
            left,
            right: left + 1.0,
        })
    }
}

type Popup = Rc<RefCell<(Vec<Suggestion>, Option<Anchor>)>>;

struct App {
    plugin: Plugin<DemoEngine>,
    buffer: RopeBuffer,
    cursor: Position,
    popup: Popup,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        let popup: Popup = Rc::default();
        let sink = Rc::clone(&popup);
        let mut plugin = Plugin::builder()
            .language(())
            .enabled(true)
            .max_suggestions(5)
            .on_suggestions(move |list: &[Suggestion], anchor: Option<Anchor>| {
                *sink.borrow_mut() = (list.to_vec(), anchor);
            })
            .build();
        if let Err(never) = plugin.on_attach() {
            match never {}
        }
        Self {
            plugin,
            buffer: RopeBuffer {
                rope: Rope::from_str(""),
            },
            cursor: Position::ZERO,
            popup,
            should_quit: false,
        }
    }

    fn apply(&mut self, tx: Option<&Transaction>) {
        if let Some(tx) = tx
            && let Some(cursor) = self.buffer.apply(tx)
        {
            self.cursor = cursor;
        }
    }

    fn insert(&mut self, text: &str) {
        let tx = Transaction::replace(Range::caret(self.cursor), text);
        self.apply(Some(&tx));
    }

    fn backspace(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.block == 0 {
                return;
            }
            let prev = self.cursor.block - 1;
            let col = self.buffer.line_text(prev).graphemes(true).count() as u32;
            let start = Position::new(prev, col);
            self.apply(Some(&Transaction::replace(
                Range::new(start, self.cursor),
                "",
            )));
        } else {
            let start = Position::new(self.cursor.block, self.cursor.col - 1);
            self.apply(Some(&Transaction::replace(
                Range::new(start, self.cursor),
                "",
            )));
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let selection = Selection::caret(self.cursor);
        match event.code {
            CKeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            CKeyCode::Char('t') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                // Terminals rarely report Ctrl+Shift+T, so route Ctrl+T to the command
                self.plugin.execute(&self.buffer, selection, Command::Toggle);
                return;
            }
            CKeyCode::Char('l') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                let line = self.cursor.block;
                let len = self.buffer.line_text(line).graphemes(true).count() as u32;
                let whole_line = Selection::new(Position::new(line, 0), Position::new(line, len));
                let outcome =
                    self.plugin
                        .execute(&self.buffer, whole_line, Command::TransliterateSelection);
                self.apply(outcome.transaction.as_ref());
            }
            CKeyCode::Tab => {
                let first = self.popup.borrow().0.first().map(|s| s.output.clone());
                if let Some(output) = first {
                    let outcome = self.plugin.execute(
                        &self.buffer,
                        selection,
                        Command::ApplySuggestion(output),
                    );
                    self.apply(outcome.transaction.as_ref());
                }
            }
            CKeyCode::Enter => {
                let outcome = self.plugin.on_key_down(
                    &self.buffer,
                    selection,
                    KeyEvent::new(KeyCode::Enter, convert_modifiers(event.modifiers)),
                );
                self.apply(outcome.transaction.as_ref());
                if !outcome.consumed {
                    self.insert("\n");
                }
            }
            CKeyCode::Backspace => self.backspace(),
            CKeyCode::Char(c) => {
                let text = c.to_string();
                let outcome =
                    self.plugin
                        .on_text_input(&self.buffer, Range::caret(self.cursor), &text);
                self.apply(outcome.transaction.as_ref());
                if !outcome.consumed {
                    self.insert(&text);
                }
            }
            _ => return,
        }
        let selection = Selection::caret(self.cursor);
        self.plugin.on_document_changed(&self.buffer, selection);
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    out
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let lines: Vec<Line> = (0..app.buffer.line_count())
        .map(|i| Line::from(app.buffer.line_text(i)))
        .collect();
    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("transliteration demo"),
    );
    f.render_widget(text, chunks[0]);

    let snapshot = app.plugin.snapshot();
    let status = if snapshot.enabled {
        "-- TAMIL -- (Ctrl+T to turn off, Tab accepts, Ctrl+L converts line, Esc quits)"
    } else {
        "-- LATIN -- (Ctrl+T to turn on, Esc quits)"
    };
    let status = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let popup = app.popup.borrow();
    if let (list, Some(anchor)) = &*popup
        && !list.is_empty()
    {
        let items: Vec<ListItem> = list
            .iter()
            .map(|s| ListItem::new(format!("{}  {}", s.output, s.input)))
            .collect();
        let width = 24u16;
        let height = list.len() as u16 + 2;
        let area = Area {
            x: (chunks[0].x + 1 + anchor.left as u16).min(chunks[0].right().saturating_sub(width)),
            // rows are coarse enough that the pixel offset is ignored
            y: chunks[0].y + 2 + app.cursor.block as u16,
            width,
            height,
        }
        .intersection(chunks[0]);
        f.render_widget(Clear, area);
        f.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            ),
            area,
        );
    }

    let col = app
        .buffer
        .line_text(app.cursor.block)
        .graphemes(true)
        .take(app.cursor.col as usize)
        .count() as u16;
    f.set_cursor(
        chunks[0].x + 1 + col,
        chunks[0].y + 1 + app.cursor.block as u16,
    );
}

fn main() -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
