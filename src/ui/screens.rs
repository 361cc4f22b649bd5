//! Wizard step screens.
//!
//! One render function per step plus the results screen. Everything is read
//! from [`AppState`]; rendering never mutates the wizard.

use crate::app::{AppState, ContactField};
use crate::contact::{is_valid_email, VerificationState};
use crate::package::{package_info, CATALOG};
use crate::results::estimate_summary;
use crate::theme::{Colors, Styles, Theme, UiText};
use crate::types::{BhkType, Room, SizeQualifier};
use crate::wizard_state::Step;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// ============================================================================
// Shared pieces
// ============================================================================

/// Split `area` into heading, subtitle and body
fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(2), // Subtitle
            Constraint::Min(3),    // Body
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn render_heading(f: &mut Frame, area: Rect, step: Step, subtitle: &str) {
    let [heading, sub, _] = screen_layout(area);
    f.render_widget(
        Paragraph::new(step.title())
            .style(Styles::title())
            .alignment(Alignment::Center),
        heading,
    );
    if !subtitle.is_empty() {
        f.render_widget(
            Paragraph::new(subtitle.to_string())
                .style(Styles::text_secondary())
                .alignment(Alignment::Center),
            sub,
        );
    }
}

/// Body column centered horizontally, at most `max_width` wide
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

fn radio(selected: bool) -> &'static str {
    if selected { "(•)" } else { "( )" }
}

// ============================================================================
// Configuration
// ============================================================================

/// Lines for the BHK list, with the size sub-choice under the chosen type.
pub fn configuration_lines(state: &AppState) -> Vec<Line<'static>> {
    let selector = state.wizard.configuration();
    let mut lines = Vec::new();

    for (i, bhk) in BhkType::all().into_iter().enumerate() {
        let chosen = selector.bhk() == Some(bhk);
        let under_cursor = i == state.bhk_cursor && !state.choosing_qualifier;
        let style = if under_cursor {
            Styles::selected()
        } else if chosen {
            Styles::chosen()
        } else {
            Styles::text()
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {:<12}", radio(chosen), bhk.to_string()),
            style,
        )));

        if chosen && bhk.requires_qualifier() {
            let mut spans = vec![Span::styled("      Size: ", Styles::text_secondary())];
            for (j, qualifier) in SizeQualifier::all().into_iter().enumerate() {
                let picked = selector.qualifier() == Some(qualifier);
                let style = if state.choosing_qualifier && j == state.qualifier_cursor {
                    Styles::selected()
                } else if picked {
                    Styles::chosen()
                } else {
                    Styles::text_muted()
                };
                spans.push(Span::styled(format!(" {} {} ", radio(picked), qualifier), style));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    let summary = match selector.value() {
        Some(configuration) => Line::from(vec![
            Span::styled("Selected: ", Styles::text_secondary()),
            Span::styled(configuration.to_string(), Styles::chosen()),
        ]),
        None if selector.awaiting_qualifier() => {
            Line::from(Span::styled("Choose Small or Large to continue", Styles::warning()))
        }
        None => Line::from(Span::styled("Nothing selected yet", Styles::text_muted())),
    };
    lines.push(summary);
    lines
}

pub fn render_configuration_screen(f: &mut Frame, area: Rect, state: &AppState) {
    render_heading(f, area, Step::Configuration, UiText::KNOW_MORE);
    let [_, _, body] = screen_layout(area);
    let column = centered_column(body, 44);
    f.render_widget(Paragraph::new(configuration_lines(state)), column);
}

// ============================================================================
// Rooms
// ============================================================================

pub fn room_lines(state: &AppState) -> Vec<Line<'static>> {
    let store = state.wizard.rooms();
    let limits = store.limits();
    let mut lines = Vec::new();

    let scope = match state.wizard.configuration().value() {
        Some(configuration) => format!("Up to {} of each room for {}", limits.max, configuration),
        None => format!("Up to {} of each room", limits.max),
    };
    lines.push(Line::from(Span::styled(scope, Styles::text_secondary())));
    lines.push(Line::from(""));

    for (i, room) in Room::all().into_iter().enumerate() {
        let label_style = if i == state.room_cursor {
            Styles::selected()
        } else {
            Styles::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<14}", room.to_string()), label_style),
            Span::raw("  "),
            Span::styled("[-]", Theme::counter_button(store.can_decrement(room))),
            Span::styled(
                format!(" {:>2} ", store.count(room)),
                Style::default()
                    .fg(Colors::FG_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("[+]", Theme::counter_button(store.can_increment(room))),
        ]));
    }
    lines
}

pub fn render_rooms_screen(f: &mut Frame, area: Rect, state: &AppState) {
    render_heading(f, area, Step::Rooms, UiText::KNOW_MORE);
    let [_, _, body] = screen_layout(area);
    let column = centered_column(body, 44);
    f.render_widget(Paragraph::new(room_lines(state)), column);
}

// ============================================================================
// Package
// ============================================================================

pub fn render_package_screen(f: &mut Frame, area: Rect, state: &AppState) {
    render_heading(f, area, Step::Package, "");
    let [_, _, body] = screen_layout(area);
    let column = centered_column(body, 76);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(column);

    let selected = state.wizard.package().selected();
    let items: Vec<Line> = CATALOG
        .iter()
        .enumerate()
        .map(|(i, info)| {
            let chosen = selected == Some(info.tier);
            let style = if i == state.package_cursor {
                Styles::selected()
            } else if chosen {
                Styles::chosen()
            } else {
                Styles::text()
            };
            Line::from(Span::styled(
                format!(" {} {} {}", radio(chosen), info.name, info.price_band),
                style,
            ))
        })
        .collect();
    f.render_widget(
        Paragraph::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive())
                .title(" Packages "),
        ),
        chunks[0],
    );

    if let Some(tier) = state.package_under_cursor() {
        let info = package_info(tier);
        let mut lines = vec![
            Line::from(Span::styled(info.description, Styles::text())),
            Line::from(""),
        ];
        lines.extend(
            info.highlights
                .iter()
                .map(|h| Line::from(vec![Span::styled("  • ", Styles::key_hint()), Span::raw(*h)])),
        );
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .title(format!(" {} ", info.name)),
            ),
            chunks[1],
        );
    }
}

// ============================================================================
// Contact
// ============================================================================

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let label_style = if focused { Styles::key_hint() } else { Styles::text_secondary() };
    let cursor = if focused { "█" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:>14}  ", label), label_style),
        Span::styled(format!("{}{}", value, cursor), Styles::text()),
    ])
}

pub fn contact_lines(state: &AppState) -> Vec<Line<'static>> {
    let contact = state.wizard.contact();
    let info = contact.info();
    let focus = state.contact_field;
    let mut lines = Vec::new();

    lines.push(field_line(ContactField::Name.label(), info.name.clone(), focus == ContactField::Name));
    lines.push(field_line(
        ContactField::Email.label(),
        info.email.clone(),
        focus == ContactField::Email,
    ));
    if !is_valid_email(&info.email) {
        lines.push(Line::from(Span::styled(
            "                Please enter a valid email address",
            Styles::warning(),
        )));
    }

    let mut mobile = field_line(
        ContactField::Mobile.label(),
        format!("{} {}", state.country_code, info.mobile),
        focus == ContactField::Mobile,
    );
    let badge = match contact.state() {
        VerificationState::Verified => Span::styled("  ✓ Verified", Styles::success()),
        VerificationState::CodeSent | VerificationState::Failed => {
            Span::styled("  OTP sent", Styles::info())
        }
        VerificationState::Unstarted => Span::styled("  [Enter] Verify", Styles::text_muted()),
    };
    mobile.spans.push(badge);
    lines.push(mobile);
    if let Some(err) = contact.mobile_error() {
        lines.push(Line::from(Span::styled(format!("                {}", err), Styles::error())));
    }

    let whatsapp_style = if focus == ContactField::WhatsApp {
        Styles::key_hint()
    } else {
        Styles::text_secondary()
    };
    lines.push(Line::from(vec![
        Span::raw("                "),
        Span::styled(
            format!(
                "[{}] {}",
                if info.whatsapp_opt_in { "x" } else { " " },
                ContactField::WhatsApp.label()
            ),
            whatsapp_style,
        ),
    ]));

    lines.push(field_line(
        ContactField::Address.label(),
        info.address.clone(),
        focus == ContactField::Address,
    ));

    lines.push(Line::from(""));
    let button_style = if contact.is_complete() {
        Styles::selected()
    } else {
        Styles::text_muted()
    };
    lines.push(Line::from(Span::styled("[ Get Estimate ]", button_style)).alignment(Alignment::Center));
    lines.push(
        Line::from(Span::styled(
            "By submitting this form, you agree to the Privacy Policy & Terms (F2)",
            Styles::text_muted(),
        ))
        .alignment(Alignment::Center),
    );
    lines
}

pub fn render_contact_screen(f: &mut Frame, area: Rect, state: &AppState) {
    render_heading(f, area, Step::Contact, UiText::CONTACT_SUBTITLE);
    let [_, _, body] = screen_layout(area);
    let column = centered_column(body, 72);
    f.render_widget(Paragraph::new(contact_lines(state)), column);
}

// ============================================================================
// Results
// ============================================================================

pub fn render_results_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(snapshot) = state.wizard.results() else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(UiText::SUBMITTED, Styles::success())).alignment(Alignment::Center),
        Line::from(""),
    ];
    lines.extend(
        estimate_summary(snapshot)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Styles::text()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "The estimate is indicative; our designer will get in touch to refine it.",
        Styles::text_secondary(),
    )));

    let column = centered_column(area, 72);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(" Your Estimate "),
        ),
        column,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard_state::WizardController;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_configuration_lines_show_size_choice() {
        let mut state = AppState::new(WizardController::new(), "+91");
        state.wizard.select_configuration(BhkType::ThreeBhk);
        let rendered = text(&configuration_lines(&state));
        assert!(rendered.contains("(•) 3 BHK"));
        assert!(rendered.contains("Size:"));
        assert!(rendered.contains("Choose Small or Large"));

        state.wizard.select_size_qualifier(SizeQualifier::Small);
        let rendered = text(&configuration_lines(&state));
        assert!(rendered.contains("Selected: 3 BHK - Small"));
    }

    #[test]
    fn test_room_lines_show_counts() {
        let mut state = AppState::new(WizardController::new(), "+91");
        state.wizard.select_configuration(BhkType::FivePlusBhk);
        let rendered = text(&room_lines(&state));
        assert!(rendered.contains("Up to 10 of each room for 5 BHK+"));
        assert!(rendered.contains("Bedroom"));
    }

    #[test]
    fn test_contact_lines_flag_bad_input() {
        let mut wizard = WizardController::new();
        wizard.select_configuration(BhkType::OneBhk);
        for _ in 0..3 {
            wizard.advance().unwrap();
        }
        let mut state = AppState::new(wizard, "+91");
        state.wizard.set_email("not-an-email");
        assert!(state.wizard.request_code().is_err());
        let rendered = text(&contact_lines(&state));
        assert!(rendered.contains("valid email"));
        assert!(rendered.contains("10-digit mobile number"));
        assert!(rendered.contains("[x] Send me updates on WhatsApp"));
    }
}
