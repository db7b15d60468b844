//! Terminal demo host for the overlay engine.
//!
//! Renders a single buffer with the line-number gutter, the current-line
//! tint, and bracket-pair highlights, and routes printable keys through the
//! auto-pairing filter. File I/O stays on this side of the boundary: the
//! engine only ever sees text.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-overlay -- [file_path]
//! ```
//!
//! # Keys
//!
//! - Arrow keys / Home / End: move the cursor
//! - Printable characters: insert (with delimiter auto-pairing)
//! - Enter / Backspace / Delete: edit
//! - Ctrl+F: find (type the query, Enter jumps to the next hit)
//! - F3 / Shift+F3: find next / previous
//! - Ctrl+S: save (when opened with a file path)
//! - Ctrl+X: quit

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use overlay_core::{
    BufferRegistry, EditorSurface, FixedRowViewport, HighlightStyle, PaintRegion, SearchOptions,
    layout, search,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{self, stdout};
use std::{env, fs, process};

const SAMPLE: &str = "#include <stdio.h>\n\nint main(int argc, char* argv[]) {\n    // try the cursor on any bracket\n    printf(\"hello (world)\\n\");\n    return 0;\n}\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Edit,
    Find,
}

struct App {
    registry: BufferRegistry,
    buffer: overlay_core::BufferId,
    scroll_top: usize,
    mode: InputMode,
    query: String,
    status: String,
    quit: bool,
}

impl App {
    fn open(path: Option<String>) -> io::Result<Self> {
        let mut registry = BufferRegistry::new();
        let (path, text) = match path {
            Some(path) => {
                let text = fs::read_to_string(&path)?;
                (Some(path), text)
            }
            None => (None, SAMPLE.to_string()),
        };
        let buffer = registry
            .open_buffer(path, &text)
            .expect("fresh registry cannot hold a duplicate path");
        Ok(Self {
            registry,
            buffer,
            scroll_top: 0,
            mode: InputMode::Edit,
            query: String::new(),
            status: String::from("Ctrl+F find | Ctrl+S save | Ctrl+X quit"),
            quit: false,
        })
    }

    fn surface(&self) -> &EditorSurface {
        self.registry.buffer(self.buffer).expect("buffer is open")
    }

    fn surface_mut(&mut self) -> &mut EditorSurface {
        self.registry
            .buffer_mut(self.buffer)
            .expect("buffer is open")
    }

    fn save(&mut self) {
        let Ok(Some(path)) = self.registry.path(self.buffer).map(|p| p.map(str::to_string))
        else {
            self.status = String::from("no file path; opened as scratch");
            return;
        };
        match fs::write(&path, self.surface().text()) {
            Ok(()) => {
                self.registry
                    .mark_saved(self.buffer)
                    .expect("buffer is open");
                self.status = format!("saved {}", path);
            }
            Err(err) => self.status = format!("save failed: {}", err),
        }
    }

    fn find(&mut self, backward: bool) {
        if self.query.is_empty() {
            return;
        }
        let text = self.surface().text();
        let cursor = self.surface().cursor();
        let options = SearchOptions {
            case_sensitive: false,
            whole_word: false,
        };
        let found = if backward {
            search::find_prev(&text, &self.query, options, cursor)
        } else {
            search::find_next(&text, &self.query, options, cursor.saturating_add(1))
        };
        match found {
            Ok(Some(m)) => {
                self.surface_mut().set_cursor(m.start);
                self.status = format!("found at offset {}", m.start);
            }
            Ok(None) => self.status = format!("not found: {}", self.query),
            Err(err) => self.status = format!("{}", err),
        }
    }

    fn move_vertically(&mut self, delta: isize) {
        let surface = self.surface();
        let doc = surface.document();
        let line = doc.line_of_offset(surface.cursor());
        let column = surface.cursor() - doc.line_range(line).map_or(0, |r| r.start);
        let target = line.saturating_add_signed(delta);
        if let Some(range) = doc.line_range(target.min(doc.line_count().saturating_sub(1))) {
            let offset = range.start + column.min(range.end - range.start);
            self.surface_mut().set_cursor(offset);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.mode == InputMode::Find {
            match key.code {
                KeyCode::Esc => self.mode = InputMode::Edit,
                KeyCode::Enter => {
                    self.mode = InputMode::Edit;
                    self.find(false);
                }
                KeyCode::Backspace => {
                    self.query.pop();
                }
                KeyCode::Char(c) => self.query.push(c),
                _ => {}
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('x') if ctrl => self.quit = true,
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char('f') if ctrl => {
                self.mode = InputMode::Find;
                self.query.clear();
            }
            KeyCode::F(3) => self.find(key.modifiers.contains(KeyModifiers::SHIFT)),
            KeyCode::Char(c) if !ctrl => {
                self.surface_mut().handle_char(c);
            }
            KeyCode::Enter => self.surface_mut().insert_newline(),
            KeyCode::Backspace => self.surface_mut().backspace(),
            KeyCode::Delete => self.surface_mut().delete_forward(),
            KeyCode::Left => self.surface_mut().move_cursor(-1),
            KeyCode::Right => self.surface_mut().move_cursor(1),
            KeyCode::Up => self.move_vertically(-1),
            KeyCode::Down => self.move_vertically(1),
            KeyCode::Home => {
                let surface = self.surface();
                let line = surface.document().line_of_offset(surface.cursor());
                if let Some(range) = surface.document().line_range(line) {
                    self.surface_mut().set_cursor(range.start);
                }
            }
            KeyCode::End => {
                let surface = self.surface();
                let line = surface.document().line_of_offset(surface.cursor());
                if let Some(range) = surface.document().line_range(line) {
                    self.surface_mut().set_cursor(range.end);
                }
            }
            _ => {}
        }
    }

    fn clamp_scroll(&mut self, viewport_height: usize) {
        let surface = self.surface();
        let line = surface.document().line_of_offset(surface.cursor());
        if line < self.scroll_top {
            self.scroll_top = line;
        }
        if viewport_height > 0 && line >= self.scroll_top + viewport_height {
            self.scroll_top = line + 1 - viewport_height;
        }
    }
}

fn line_spans(surface: &EditorSurface, line_idx: usize) -> Line<'static> {
    let doc = surface.document();
    let Some(range) = doc.line_range(line_idx) else {
        return Line::from("");
    };
    let text = doc.line_text(line_idx).unwrap_or_default();

    let current_line = surface.highlights().iter().any(|h| {
        h.style == HighlightStyle::CurrentLine && h.range.start <= range.start && range.end <= h.range.end
    });
    let base = if current_line {
        Style::default().bg(Color::Rgb(40, 40, 24))
    } else {
        Style::default()
    };
    let bracket = Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut run = String::new();
    for (i, ch) in text.chars().enumerate() {
        let offset = range.start + i;
        let matched = surface
            .highlights()
            .iter()
            .any(|h| h.style == HighlightStyle::BracketMatch && h.range.contains(&offset));
        if matched {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), base));
            }
            spans.push(Span::styled(ch.to_string(), bracket));
        } else {
            run.push(ch);
        }
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, base));
    }
    Line::from(spans).style(base)
}

fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());
    let editor_area = chunks[0];
    let status_area = chunks[1];

    let surface = app.surface();
    let doc = surface.document();
    let gutter_width = surface.gutter_width() as u16;

    // Gutter strip for the visible rows.
    let mut viewport = FixedRowViewport::new(doc.line_count(), 1);
    viewport.scroll_to(app.scroll_top);
    let strip = surface.paint_gutter(
        &viewport,
        PaintRegion::new(0, editor_area.height.saturating_sub(1) as isize),
    );

    let gutter_area = Rect {
        width: gutter_width.min(editor_area.width),
        ..editor_area
    };
    let text_area = Rect {
        x: editor_area.x + gutter_area.width,
        width: editor_area.width.saturating_sub(gutter_area.width),
        ..editor_area
    };

    let gutter_lines: Vec<Line> = strip
        .spans
        .iter()
        .map(|span| {
            Line::from(format!(
                "{:>width$} ",
                span.line_number,
                width = strip.width.saturating_sub(1)
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(gutter_lines).style(Style::default().fg(Color::DarkGray)),
        gutter_area,
    );

    let text_lines: Vec<Line> = strip
        .spans
        .iter()
        .map(|span| line_spans(surface, span.line_number - 1))
        .collect();
    frame.render_widget(Paragraph::new(text_lines), text_area);

    // Status line.
    let path = app
        .registry
        .path(app.buffer)
        .ok()
        .flatten()
        .unwrap_or("[scratch]");
    let modified = if app.registry.is_modified(app.buffer).unwrap_or(false) {
        "*"
    } else {
        ""
    };
    let cursor_line = doc.line_of_offset(surface.cursor());
    let column = surface.cursor() - doc.line_range(cursor_line).map_or(0, |r| r.start);
    let status = match app.mode {
        InputMode::Find => format!("find: {}", app.query),
        InputMode::Edit => format!(
            "{}{}  {}:{}  {}",
            path,
            modified,
            cursor_line + 1,
            column + 1,
            app.status
        ),
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::default().bg(Color::Blue).fg(Color::White)),
        status_area,
    );

    // Terminal cursor on the logical cursor position.
    if app.mode == InputMode::Edit && cursor_line >= app.scroll_top {
        let row = cursor_line - app.scroll_top;
        if (row as u16) < editor_area.height {
            let line_text = doc.line_text(cursor_line).unwrap_or_default();
            let x = layout::visual_x_for_column(&line_text, column, layout::DEFAULT_TAB_WIDTH);
            frame.set_cursor_position(Position::new(
                text_area.x + (x as u16).min(text_area.width.saturating_sub(1)),
                editor_area.y + row as u16,
            ));
        }
    }
}

fn run(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = loop {
        let height = terminal.size()?.height.saturating_sub(1) as usize;
        app.clamp_scroll(height);
        if let Err(err) = terminal.draw(|frame| draw(frame, &app)) {
            break Err(err);
        }
        match event::read() {
            Ok(Event::Key(key)) => app.handle_key(key),
            Ok(_) => {}
            Err(err) => break Err(err),
        }
        if app.quit {
            break Ok(());
        }
    };

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    result
}

fn main() {
    let path = env::args().nth(1);
    let app = match App::open(path) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };
    if let Err(err) = run(app) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
