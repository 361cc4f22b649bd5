//! Help overlay component
//!
//! Displays context-sensitive help using a floating window.

use super::floating_window::{FloatingWindow, FloatingWindowConfig};
use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::Screen;
use crate::theme::Colors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

const CLOSE_HINT: &str = "Press ?, F1 or Esc to close";

/// Help overlay component
pub struct HelpOverlay {
    window: FloatingWindow,
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given screen
    pub fn new(screen: Screen, keybinding_ctx: &KeybindingContext) -> Self {
        let config = FloatingWindowConfig {
            title: "Help".to_string(),
            width_percent: 60,
            height_percent: 70,
            min_width: 44,
            min_height: 14,
            max_width: 72,
            max_height: 32,
        };

        let sections = keybinding_ctx.get_help_content(screen);
        Self {
            window: FloatingWindow::new(config),
            content: Self::build_content(&sections, screen),
        }
    }

    fn build_content(sections: &[HelpSection], screen: Screen) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = vec![
            Line::from(vec![
                Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
                Span::styled(screen.name(), Style::default().fg(Colors::SECONDARY)),
            ]),
            Line::from(""),
        ];

        for section in sections {
            lines.push(Line::from(Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )));
            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Style::default().fg(Colors::FG_PRIMARY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }

    pub fn render(&self, f: &mut Frame, parent: Rect) {
        self.window
            .render_lines(f, parent, &self.content, Some(CLOSE_HINT));
    }

    #[cfg(test)]
    fn text(&self) -> String {
        self.content
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_screen_bindings() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(Screen::CodePrompt, &ctx);
        let text = overlay.text();
        assert!(text.contains("Verify OTP"));
        assert!(text.contains("Resend OTP"));
        assert!(text.contains("Ctrl+C"));
    }
}
