//! TUI application main loop.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::error::{MetaviewError, Result};

use super::events::{Event, EventHandler, KeyBindings};
use super::state::{ViewLine, ViewerState};
use super::theme::available_themes;

/// Run the viewer until the user quits.
pub fn run(mut app: ViewerState) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        MetaviewError::io(
            "Cannot launch TUI - no interactive terminal available. \
             The TUI requires a terminal with keyboard input support",
            e,
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| MetaviewError::io("Failed to enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| MetaviewError::io("Failed to create terminal", e))?;

    debug!(rows = app.total_rows(), source = %app.source, "starting viewer");
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| MetaviewError::io("Failed to disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| MetaviewError::io("Failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| MetaviewError::io("Failed to show cursor", e))?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ViewerState,
) -> Result<()> {
    let events = EventHandler::new(Duration::from_millis(100));
    let bindings = KeyBindings::default();

    loop {
        terminal
            .draw(|f| draw_ui(f, app))
            .map_err(|e| MetaviewError::io("Failed to draw TUI", e))?;

        match events.next() {
            Ok(Event::Key(key)) => {
                if handle_key(app, &bindings, key) == Flow::Quit {
                    return Ok(());
                }
            }
            Ok(Event::Tick | Event::Resize) => {}
            Err(_) => {
                return Err(MetaviewError::TuiError {
                    message: "event channel closed".to_string(),
                })
            }
        }
    }
}

/// Whether the loop keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut ViewerState, bindings: &KeyBindings, key: KeyEvent) -> Flow {
    app.status_message = None;

    if app.searching {
        // The query is re-filtered on every keystroke
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Flow::Quit,
            (_, KeyCode::Esc) => app.clear_search(),
            (_, KeyCode::Enter) => app.confirm_search(),
            (_, KeyCode::Backspace) => app.pop_char(),
            (_, KeyCode::Up) => app.scroll_up(1),
            (_, KeyCode::Down) => app.scroll_down(1),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.push_char(c),
            _ => {}
        }
        return Flow::Continue;
    }

    if app.show_help {
        if bindings.is_quit(&key) && key.modifiers == KeyModifiers::CONTROL {
            return Flow::Quit;
        }
        if bindings.is_help(&key) || bindings.is_back(&key) || bindings.is_quit(&key) {
            app.show_help = false;
        }
        return Flow::Continue;
    }

    if bindings.is_quit(&key) {
        return Flow::Quit;
    } else if bindings.is_search(&key) {
        app.start_search();
    } else if bindings.is_back(&key) {
        app.clear_search();
    } else if bindings.is_down(&key) {
        app.scroll_down(1);
    } else if bindings.is_up(&key) {
        app.scroll_up(1);
    } else if bindings.is_page_down(&key) {
        app.page_down();
    } else if bindings.is_page_up(&key) {
        app.page_up();
    } else if bindings.is_top(&key) {
        app.scroll_to_top();
    } else if bindings.is_bottom(&key) {
        app.scroll_to_bottom();
    } else if bindings.is_help(&key) {
        app.toggle_help();
    } else if bindings.is_theme(&key) {
        app.cycle_theme();
    }
    Flow::Continue
}

fn draw_ui(f: &mut Frame, app: &mut ViewerState) {
    let search_height = if app.searching || !app.query.is_empty() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(search_height),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(Block::default().style(app.theme.base_style()), f.area());

    draw_header(f, app, chunks[0]);

    // Borders take two lines of the list area
    app.set_viewport(usize::from(chunks[1].height.saturating_sub(2)));
    draw_metadata_list(f, app, chunks[1]);

    if search_height > 0 {
        draw_search_bar(f, app, chunks[2]);
    }
    draw_status_bar(f, app, chunks[3]);

    if app.show_help {
        draw_help_overlay(f, app);
    }
}

fn draw_header(f: &mut Frame, app: &ViewerState, area: Rect) {
    let theme = &app.theme;
    let spans = match &app.file_info {
        Some(info) => vec![
            Span::styled(info.display_name().to_string(), theme.heading_style()),
            Span::styled("  Type: ", theme.muted_style()),
            Span::raw(info.display_type().to_string()),
            Span::styled("  Size: ", theme.muted_style()),
            Span::raw(info.display_size()),
        ],
        None => vec![Span::styled(app.source.clone(), theme.heading_style())],
    };

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(" metaview "),
    );
    f.render_widget(header, area);
}

fn draw_metadata_list(f: &mut Frame, app: &ViewerState, area: Rect) {
    let theme = &app.theme;
    let lines: Vec<Line> = app
        .lines()
        .into_iter()
        .skip(app.scroll_offset)
        .take(app.viewport)
        .map(|line| match line {
            ViewLine::Heading(tool) => Line::from(Span::styled(tool, theme.heading_style())),
            ViewLine::Row { label, value, is_error: true } => Line::from(vec![
                Span::styled(format!("  {label}: "), theme.error_style()),
                Span::styled(value, theme.error_style()),
            ]),
            ViewLine::Row { label, value, is_error: false } => Line::from(vec![
                Span::styled(format!("  {label}: "), theme.label_style()),
                Span::raw(value),
            ]),
            ViewLine::Continuation { text, is_error } => {
                let style = if is_error { theme.error_style() } else { Style::default() };
                Line::from(Span::styled(format!("    {text}"), style))
            }
            ViewLine::Blank => Line::from(""),
            ViewLine::Empty(message) => Line::from(Span::styled(message, theme.muted_style())),
        })
        .collect();

    let title = format!(" Metadata ({}/{}) ", app.visible_rows(), app.total_rows());
    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(title),
    );
    f.render_widget(list, area);
}

fn draw_search_bar(f: &mut Frame, app: &ViewerState, area: Rect) {
    let search_text = format!(
        "/{}{}",
        &app.query,
        if app.searching { "█" } else { "" },
    );
    let title = if app.searching {
        " Search (Enter to keep, Esc to clear) "
    } else {
        " Search (/ to edit, Esc to clear) "
    };

    let paragraph = Paragraph::new(search_text)
        .style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.warning_style())
                .title(title),
        );
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &ViewerState, area: Rect) {
    let text = app.status_message.clone().unwrap_or_else(|| {
        format!(
            " {} | theme: {} | / search  ? help  q quit",
            app.source, app.theme.name
        )
    });
    f.render_widget(Paragraph::new(text).style(app.theme.muted_style()), area);
}

fn draw_help_overlay(f: &mut Frame, app: &ViewerState) {
    let area = centered_rect(50, 60, f.area());

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/↓       Scroll down"),
        Line::from("  k/↑       Scroll up"),
        Line::from("  PgDn      Page down"),
        Line::from("  PgUp      Page up"),
        Line::from("  g         Top"),
        Line::from("  G         Bottom"),
        Line::from(""),
        Line::from("Search:"),
        Line::from("  /         Start search"),
        Line::from("  Enter     Keep query"),
        Line::from("  Esc       Clear query"),
        Line::from(""),
        Line::from(format!("  T         Cycle theme ({})", available_themes().join("/"))),
        Line::from("  ?         Toggle help"),
        Line::from("  q         Quit"),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(app.theme.border_style())
            .style(app.theme.base_style()),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// Rectangle centered in `area`, sized as percentages of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FlatRow, ToolSection};
    use ratatui::{backend::TestBackend, Terminal};

    fn viewer() -> ViewerState {
        let sections = vec![
            ToolSection {
                tool: "exiftool".to_string(),
                rows: vec![
                    FlatRow::new("exiftool", "Make", "Make", "Canon"),
                    FlatRow::new("exiftool", "Model", "Model", "EOS R5"),
                ],
            },
            ToolSection {
                tool: "ffprobe".to_string(),
                rows: vec![FlatRow::error("ffprobe", "ffprobe not installed")],
            },
        ];
        ViewerState::new(sections, None, "photo.json")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_search_keys() {
        let mut app = viewer();
        let bindings = KeyBindings::default();

        handle_key(&mut app, &bindings, key(KeyCode::Char('/')));
        assert!(app.searching);

        // 'q' is text while typing a query
        for c in "eos".chars() {
            assert_eq!(handle_key(&mut app, &bindings, key(KeyCode::Char(c))), Flow::Continue);
        }
        assert_eq!(app.query, "eos");
        assert_eq!(app.visible_rows(), 1);

        handle_key(&mut app, &bindings, key(KeyCode::Enter));
        assert!(!app.searching);
        assert_eq!(app.query, "eos");

        handle_key(&mut app, &bindings, key(KeyCode::Esc));
        assert!(app.query.is_empty());
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = viewer();
        let bindings = KeyBindings::default();

        handle_key(&mut app, &bindings, key(KeyCode::Char('?')));
        assert!(app.show_help);
        assert_eq!(handle_key(&mut app, &bindings, key(KeyCode::Char('q'))), Flow::Continue);
        assert!(!app.show_help);
        assert_eq!(handle_key(&mut app, &bindings, key(KeyCode::Char('q'))), Flow::Quit);
    }

    #[test]
    fn test_draw_renders_rows() {
        let mut app = viewer();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| draw_ui(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("EXIFTOOL"));
        assert!(text.contains("Make: Canon"));
        assert!(text.contains("Error: ffprobe not installed"));
        assert!(text.contains("Metadata (3/3)"));
        assert_eq!(app.viewport, 10);
    }
}
