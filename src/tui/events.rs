//! TUI event handling.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal tick.
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
}

/// Event handler using channels.
pub struct EventHandler {
    /// Event receiver.
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler polling the terminal every `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    // Windows reports both press and release
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(..)) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(event) = forwarded {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }

            if tx.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Get the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// Key binding configuration for browse mode.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Quit keys.
    pub quit: Vec<KeyEvent>,
    /// Scroll up one line.
    pub up: Vec<KeyEvent>,
    /// Scroll down one line.
    pub down: Vec<KeyEvent>,
    /// Scroll up one page.
    pub page_up: Vec<KeyEvent>,
    /// Scroll down one page.
    pub page_down: Vec<KeyEvent>,
    /// Jump to the first line.
    pub top: Vec<KeyEvent>,
    /// Jump to the last line.
    pub bottom: Vec<KeyEvent>,
    /// Start typing a search query.
    pub search: Vec<KeyEvent>,
    /// Clear the query / close overlays.
    pub back: Vec<KeyEvent>,
    /// Toggle the help overlay.
    pub help: Vec<KeyEvent>,
    /// Cycle themes.
    pub theme: Vec<KeyEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        Self {
            quit: vec![
                key(KeyCode::Char('q')),
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ],
            up: vec![key(KeyCode::Up), key(KeyCode::Char('k'))],
            down: vec![key(KeyCode::Down), key(KeyCode::Char('j'))],
            page_up: vec![
                key(KeyCode::PageUp),
                KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            ],
            page_down: vec![
                key(KeyCode::PageDown),
                KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            ],
            top: vec![key(KeyCode::Char('g')), key(KeyCode::Home)],
            // Shift+g arrives as uppercase with SHIFT on most terminals
            bottom: vec![
                key(KeyCode::Char('G')),
                KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
                key(KeyCode::End),
            ],
            search: vec![key(KeyCode::Char('/'))],
            back: vec![key(KeyCode::Esc)],
            help: vec![
                key(KeyCode::Char('?')),
                KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT),
            ],
            theme: vec![
                key(KeyCode::Char('T')),
                KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT),
            ],
        }
    }
}

fn matches(bindings: &[KeyEvent], key: &KeyEvent) -> bool {
    bindings.iter().any(|k| k.code == key.code && k.modifiers == key.modifiers)
}

impl KeyBindings {
    /// Check if a key matches quit binding.
    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        matches(&self.quit, key)
    }

    /// Check if a key matches up binding.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        matches(&self.up, key)
    }

    /// Check if a key matches down binding.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        matches(&self.down, key)
    }

    /// Check if a key matches page up binding.
    pub fn is_page_up(&self, key: &KeyEvent) -> bool {
        matches(&self.page_up, key)
    }

    /// Check if a key matches page down binding.
    pub fn is_page_down(&self, key: &KeyEvent) -> bool {
        matches(&self.page_down, key)
    }

    /// Check if a key matches top binding.
    pub fn is_top(&self, key: &KeyEvent) -> bool {
        matches(&self.top, key)
    }

    /// Check if a key matches bottom binding.
    pub fn is_bottom(&self, key: &KeyEvent) -> bool {
        matches(&self.bottom, key)
    }

    /// Check if a key matches search binding.
    pub fn is_search(&self, key: &KeyEvent) -> bool {
        matches(&self.search, key)
    }

    /// Check if a key matches back binding.
    pub fn is_back(&self, key: &KeyEvent) -> bool {
        matches(&self.back, key)
    }

    /// Check if a key matches help binding.
    pub fn is_help(&self, key: &KeyEvent) -> bool {
        matches(&self.help, key)
    }

    /// Check if a key matches theme binding.
    pub fn is_theme(&self, key: &KeyEvent) -> bool {
        matches(&self.theme, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_quit(&press('q')));
        assert!(bindings.is_down(&press('j')));
        assert!(bindings.is_up(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        assert!(bindings.is_search(&press('/')));
        assert!(bindings.is_top(&press('g')));
        assert!(bindings.is_bottom(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(bindings.is_help(&press('?')));
        assert!(!bindings.is_quit(&press('x')));
    }

    #[test]
    fn test_modifiers_must_match() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!bindings.is_quit(&press('c')));
    }
}
