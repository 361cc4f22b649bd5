//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title, progress stepper, status line, nav bar and help overlay
//! - `screens` - One screen per wizard step plus the results screen
//! - `dialogs` - The one-time code prompt and the "know more" overlays

mod dialogs;
mod header;
pub mod screens;

pub use dialogs::{code_slots, info_text};
pub use header::{progress_label, stepper_line, HeaderRenderer};

use crate::app::{AppState, Screen};
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Main UI renderer
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Draw one frame for the current state
    pub fn render(&self, f: &mut Frame, state: &AppState, keys: &KeybindingContext) {
        let screen = state.screen();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        self.header
            .render(f, chunks[0], state.wizard.step(), state.wizard.is_finished());

        match screen {
            Screen::Configuration => screens::render_configuration_screen(f, chunks[1], state),
            Screen::Rooms => screens::render_rooms_screen(f, chunks[1], state),
            Screen::Package => screens::render_package_screen(f, chunks[1], state),
            Screen::Contact | Screen::CodePrompt => {
                screens::render_contact_screen(f, chunks[1], state)
            }
            Screen::Results => screens::render_results_screen(f, chunks[1], state),
        }

        header::render_status(f, chunks[2], &state.status_message);
        header::render_nav_bar(f, screen, keys, chunks[3]);

        if screen == Screen::CodePrompt {
            let area = f.area();
            dialogs::render_code_prompt(f, state, area);
        }
        if state.info_visible {
            dialogs::render_info_overlay(f, state.wizard.step());
        }
        if state.help_visible {
            header::render_help_overlay(f, screen, keys);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BhkType;
    use crate::wizard_state::WizardController;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = UiRenderer::new();
        let keys = KeybindingContext::new();
        terminal
            .draw(|f| renderer.render(f, state, &keys))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_first_step() {
        let state = AppState::new(WizardController::new(), "+91");
        let screen = draw(&state);
        assert!(screen.contains("Select your BHK type"));
        assert!(screen.contains("1 BHK"));
        assert!(screen.contains("1/4"));
    }

    #[test]
    fn test_renders_code_prompt_over_contact() {
        let mut wizard = WizardController::new();
        wizard.select_configuration(BhkType::OneBhk);
        for _ in 0..3 {
            wizard.advance().unwrap();
        }
        wizard.set_mobile("9876543210");
        wizard.request_code().unwrap();

        let state = AppState::new(wizard, "+91");
        let screen = draw(&state);
        assert!(screen.contains("Verify OTP"));
        assert!(screen.contains("[ ][ ][ ][ ][ ][ ]"));
    }

    #[test]
    fn test_info_overlay_drawn_on_top() {
        let mut state = AppState::new(WizardController::new(), "+91");
        state.info_visible = true;
        let screen = draw(&state);
        assert!(screen.contains("BHK Configuration Information"));
    }
}
