//! Floating dialogs: the one-time code prompt and the per-step info texts.

use crate::app::AppState;
use crate::components::floating_window::{FloatingWindow, FloatingWindowConfig};
use crate::theme::{Styles, UiText};
use crate::wizard_state::Step;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    Frame,
};

/// Title and body of the "know more" overlay for each step
pub fn info_text(step: Step) -> (&'static str, &'static [&'static str]) {
    match step {
        Step::Configuration => (
            "BHK Configuration Information",
            &[
                "Select your apartment type based on the number of bedrooms, hall, and kitchen. \
                 We offer customized interior design solutions for each configuration.",
                "",
                "Small apartments are typically compact spaces with efficient layouts, while \
                 large apartments offer more spacious living areas with enhanced design \
                 possibilities.",
            ],
        ),
        Step::Rooms => (
            "Room Design Information",
            &[
                "Our expert designers will create personalized solutions for each room based on \
                 your lifestyle, preferences, and space requirements.",
                "",
                "We handle everything from space planning to furniture selection and color \
                 coordination. Each room is designed with attention to functionality, \
                 aesthetics, and your specific needs.",
            ],
        ),
        Step::Package => (
            "Package Information",
            &[
                "Packages set the range of materials, finishes and accessories used across \
                 your home.",
                "",
                "Basic Blends covers the essentials at an affordable price. Luxury Lux adds \
                 premium materials and bespoke designs.",
            ],
        ),
        Step::Contact => (
            "Privacy Policy & Terms",
            &[
                "The estimate is non-binding and indicative only. Final pricing is subject to \
                 a site visit, and the estimate is valid for 15 days.",
                "",
                "By selecting \"Get Estimate\" you confirm your details are accurate, agree \
                 that the cost is indicative, consent to being contacted about your request, \
                 and accept our Privacy Policy & Terms.",
                "",
                "We never share or sell your data. Reply STOP to any message to opt out.",
            ],
        ),
    }
}

/// Render the info overlay for `step`
pub fn render_info_overlay(f: &mut Frame, step: Step) {
    let (title, body) = info_text(step);
    let window = FloatingWindow::new(FloatingWindowConfig {
        title: title.to_string(),
        width_percent: 60,
        height_percent: 50,
        ..FloatingWindowConfig::default()
    });
    let lines: Vec<Line<'static>> = body
        .iter()
        .map(|para| Line::from(Span::styled(*para, Styles::text())))
        .collect();
    let area = f.area();
    window.render_lines(f, area, &lines, Some("Press Esc or Enter to close"));
}

/// `[1][2][ ][ ][ ][ ]` style slots for the typed code
pub fn code_slots(entered: &str, length: usize) -> String {
    let mut digits = entered.chars();
    (0..length)
        .map(|_| format!("[{}]", digits.next().unwrap_or(' ')))
        .collect()
}

/// Body of the code prompt
pub fn code_prompt_lines(state: &AppState) -> Vec<Line<'static>> {
    let contact = state.wizard.contact();
    let mobile = &contact.info().mobile;

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "We've sent a {}-digit code to {}{}",
                contact.code_length(),
                state.country_code,
                mobile
            ),
            Styles::text_secondary(),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            code_slots(contact.entered_code(), contact.code_length()),
            Styles::title(),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
    ];

    if contact.is_waiting() {
        let label = if contact.entered_code().len() == contact.code_length() {
            UiText::VERIFYING
        } else {
            UiText::SENDING
        };
        lines.push(Line::from(Span::styled(label, Styles::info())).alignment(Alignment::Center));
    } else if let Some(condition) = contact.condition() {
        let style = if contact.is_degraded() {
            Styles::warning()
        } else {
            Styles::error()
        };
        lines.push(
            Line::from(Span::styled(condition.message(), style)).alignment(Alignment::Center),
        );
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(vec![
            Span::styled(format!("{} ", UiText::RESEND_HINT), Styles::text_muted()),
            Span::styled("[R] Resend OTP", Styles::key_hint()),
        ])
        .alignment(Alignment::Center),
    );
    lines
}

/// Render the code prompt over the contact screen
pub fn render_code_prompt(f: &mut Frame, state: &AppState, parent: Rect) {
    let window = FloatingWindow::new(FloatingWindowConfig {
        title: "Verify OTP".to_string(),
        width_percent: 50,
        height_percent: 40,
        min_height: 12,
        ..FloatingWindowConfig::default()
    });
    window.render_lines(
        f,
        parent,
        &code_prompt_lines(state),
        Some("[Enter] Verify | [Esc] Close"),
    );
}
