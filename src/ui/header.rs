//! Header and common widget rendering
//!
//! The title, the four-step progress stepper, the status line, the nav bar
//! and the help overlay.

use crate::app::Screen;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::{Styles, Theme, UiText};
use crate::wizard_state::Step;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header renderer: title plus progress stepper
pub struct HeaderRenderer {
    title: Line<'static>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            title: Line::from(Span::styled(UiText::APP_TITLE, Styles::title())),
        }
    }

    /// Render title, stepper and "n/4" into `area`
    pub fn render(&self, f: &mut Frame, area: Rect, current: Step, finished: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = vec![
            self.title.clone(),
            stepper_line(current, finished),
            Line::from(Span::styled(
                progress_label(current, finished),
                Styles::text_secondary(),
            )),
        ];
        let header = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Styles::border_inactive()),
            )
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }
}

/// One span per step, completed steps ticked
pub fn stepper_line(current: Step, finished: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, step) in Step::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ── ", Styles::text_muted()));
        }
        let completed = finished || step.index() < current.index();
        let active = !finished && *step == current;
        let marker = if completed {
            "✓"
        } else if active {
            "●"
        } else {
            "○"
        };
        spans.push(Span::styled(
            format!("{} {}", marker, step.label()),
            Theme::step_style(completed, active),
        ));
    }
    Line::from(spans)
}

/// "2/4" style position
pub fn progress_label(current: Step, finished: bool) -> String {
    let position = if finished {
        Step::TOTAL_STEPS
    } else {
        current.index() + 1
    };
    format!("{}/{}", position, Step::TOTAL_STEPS)
}

/// Render the one-line status message
pub fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Styles::info());
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, screen: Screen, keybinding_ctx: &KeybindingContext, area: Rect) {
    let nav_bar = NavBar::new(keybinding_ctx.get_nav_items(screen));
    nav_bar.render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, screen: Screen, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(screen, keybinding_ctx);
    let area = f.area();
    help_overlay.render(f, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_label() {
        assert_eq!(progress_label(Step::Configuration, false), "1/4");
        assert_eq!(progress_label(Step::Package, false), "3/4");
        assert_eq!(progress_label(Step::Contact, true), "4/4");
    }

    #[test]
    fn test_stepper_marks_completed_steps() {
        let line = stepper_line(Step::Package, false).to_string();
        assert!(line.starts_with("✓ BHK TYPE"));
        assert!(line.contains("✓ ROOMS TO DESIGN"));
        assert!(line.contains("● PACKAGE"));
        assert!(line.contains("○ GET QUOTE"));
    }
}
