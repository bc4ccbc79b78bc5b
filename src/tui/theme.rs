//! TUI theming and colors.

use ratatui::style::{Color, Modifier, Style};

/// Viewer theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Name of the theme.
    pub name: String,
    /// Background color.
    pub background: Color,
    /// Foreground color.
    pub foreground: Color,
    /// Primary accent color (header, search prompt).
    pub primary: Color,
    /// Tool section heading color.
    pub heading: Color,
    /// Row label color.
    pub label: Color,
    /// Muted text (hints, counters).
    pub muted: Color,
    /// Border color.
    pub border: Color,
    /// Error color.
    pub error: Color,
    /// Warning color.
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Reset,
            foreground: Color::White,
            primary: Color::Cyan,
            heading: Color::Magenta,
            label: Color::Cyan,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            error: Color::Red,
            warning: Color::Yellow,
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            primary: Color::Blue,
            heading: Color::Magenta,
            label: Color::Blue,
            muted: Color::Gray,
            border: Color::Gray,
            error: Color::Red,
            warning: Color::Yellow,
        }
    }

    /// Create a high contrast theme.
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            background: Color::Black,
            foreground: Color::White,
            primary: Color::Yellow,
            heading: Color::Yellow,
            label: Color::Cyan,
            muted: Color::White,
            border: Color::White,
            error: Color::LightRed,
            warning: Color::Yellow,
        }
    }

    /// Get theme by name. `default` is the dark theme.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" | "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Theme following this one in [`available_themes`].
    #[must_use]
    pub fn next(&self) -> Self {
        let themes = available_themes();
        let index = themes.iter().position(|t| *t == self.name).unwrap_or(0);
        let next = themes[(index + 1) % themes.len()];
        Self::from_name(next).unwrap_or_default()
    }

    /// Base style for the whole screen.
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Get style for borders.
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for tool section headings.
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for row labels.
    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    /// Get style for muted text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for errors.
    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for warnings.
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }
}

/// Available themes list.
pub fn available_themes() -> Vec<&'static str> {
    vec!["dark", "light", "high-contrast"]
}
