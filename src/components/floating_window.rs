//! Floating window component
//!
//! A centered, bordered panel drawn over the current screen. Used by the
//! help overlay, the "know more" texts and the OTP prompt.

use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Size and decoration of a floating window
#[derive(Debug, Clone)]
pub struct FloatingWindowConfig {
    pub title: String,
    pub width_percent: u16,
    pub height_percent: u16,
    pub min_width: u16,
    pub min_height: u16,
    pub max_width: u16,
    pub max_height: u16,
}

impl Default for FloatingWindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width_percent: 60,
            height_percent: 50,
            min_width: 40,
            min_height: 10,
            max_width: 76,
            max_height: 30,
        }
    }
}

fn percent_of(total: u16, percent: u16) -> u16 {
    (u32::from(total) * u32::from(percent) / 100) as u16
}

pub struct FloatingWindow {
    config: FloatingWindowConfig,
}

impl FloatingWindow {
    pub fn new(config: FloatingWindowConfig) -> Self {
        Self { config }
    }

    /// Centered area inside `parent`, clamped to the configured bounds.
    pub fn area(&self, parent: Rect) -> Rect {
        let c = &self.config;
        let width = percent_of(parent.width, c.width_percent)
            .clamp(c.min_width, c.max_width)
            .min(parent.width);
        let height = percent_of(parent.height, c.height_percent)
            .clamp(c.min_height, c.max_height)
            .min(parent.height);
        Rect::new(
            parent.x + (parent.width - width) / 2,
            parent.y + (parent.height - height) / 2,
            width,
            height,
        )
    }

    /// Clear the window area and draw the frame; returns the inner area.
    pub fn render_frame(&self, f: &mut Frame, parent: Rect) -> Rect {
        let area = self.area(parent);
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(format!(" {} ", self.config.title))
            .title_style(
                Style::default()
                    .fg(Colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Styles::overlay_bg());
        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    }

    /// Render wrapped lines with an optional footer hint.
    pub fn render_lines(
        &self,
        f: &mut Frame,
        parent: Rect,
        lines: &[Line<'static>],
        footer: Option<&str>,
    ) {
        let inner = self.render_frame(f, parent);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(if footer.is_some() { 1 } else { 0 }),
            ])
            .split(inner);

        let body = Paragraph::new(lines.to_vec()).wrap(Wrap { trim: false });
        f.render_widget(body, chunks[0]);

        if let Some(footer) = footer {
            let hint = Paragraph::new(footer.to_string())
                .alignment(Alignment::Center)
                .style(Styles::text_muted());
            f.render_widget(hint, chunks[1]);
        }
    }
}
