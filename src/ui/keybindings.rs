//! Keyboard shortcuts for the demo wizard.
//!
//! Single source of truth for the footer hint line and the `keys`
//! subcommand.

use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    pub category: ShortcutCategory,
    /// Shown in the footer hint line
    pub in_footer: bool,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    /// Step indicator focus and activation
    Indicators,
    /// Previous/next triggers
    Navigation,
}

impl ShortcutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Indicators => "Step Indicators",
            ShortcutCategory::Navigation => "Navigation",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::Indicators,
            ShortcutCategory::Navigation,
            ShortcutCategory::General,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Enter", "n/→")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Right),
        description: "Move focus between steps",
        category: ShortcutCategory::Indicators,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Home,
        alt_key: Some(KeyCode::End),
        description: "Focus first / last step",
        category: ShortcutCategory::Indicators,
        in_footer: false,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char(' ')),
        description: "Open focused step",
        category: ShortcutCategory::Indicators,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Char('n'),
        alt_key: None,
        description: "Next step / finish",
        category: ShortcutCategory::Navigation,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Char('p'),
        alt_key: None,
        description: "Previous step",
        category: ShortcutCategory::Navigation,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        description: "Quit",
        category: ShortcutCategory::General,
        in_footer: true,
    },
];

/// Get shortcuts grouped by category, in display order
pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// Footer hint line, e.g. "←/→ move focus  n next ..."
pub fn footer_line() -> Line<'static> {
    let mut spans = Vec::new();
    for shortcut in SHORTCUTS.iter().filter(|s| s.in_footer) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            shortcut.key_display(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {}", shortcut.description.to_lowercase()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Plain-text shortcut table for the `keys` subcommand
pub fn shortcut_table() -> String {
    let mut out = String::new();
    for (category, shortcuts) in shortcuts_by_category() {
        out.push_str(&format!("{}:\n", category.display_name()));
        for shortcut in shortcuts {
            out.push_str(&format!(
                "  {:<12} {}\n",
                shortcut.key_display(),
                shortcut.description
            ));
        }
    }
    out
}
