//! Application module
//!
//! Contains the interactive event loop and key handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, Screen, ContactField)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, ContactField, Screen};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config_file::AppConfig;
use crate::contact::ContactFormValidator;
use crate::results::ResultsSink;
use crate::theme::UiText;
use crate::types::{BhkType, Room, SizeQualifier};
use crate::ui::UiRenderer;
use crate::verification::{VerificationMessage, VerificationRequest, VerificationWorker, mask_mobile};
use crate::wizard_state::{QuoteSnapshot, SubmitProgress, WizardController};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Main application struct
pub struct App {
    state: AppState,
    /// Runs delivery/confirmation off the UI thread
    worker: VerificationWorker,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
    /// Receives the quote once submitted
    results_sink: Option<Box<dyn ResultsSink>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &AppConfig, results_sink: Option<Box<dyn ResultsSink>>) -> Self {
        info!(
            "Creating new App instance (verification backend: {})",
            config.verification.backend
        );
        let (delivery, confirmation) = config.capabilities();
        let wizard =
            WizardController::with_contact(ContactFormValidator::new(config.code_length));

        Self {
            state: AppState::new(wizard, config.country_code.clone()),
            worker: VerificationWorker::new(delivery, confirmation),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            results_sink,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> crate::error::Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_verification();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event) {
                        break;
                    }
                }
            }

            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context)
            })?;
        }

        info!("Leaving main application loop");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Verification plumbing
    // ---------------------------------------------------------------------

    fn dispatch(&mut self, request: VerificationRequest) {
        debug!("Dispatching verification request {}", request.generation);
        self.worker.dispatch(request);
    }

    /// Apply every finished verification call without blocking
    pub fn poll_verification(&mut self) {
        while let Some(message) = self.worker.try_recv() {
            self.apply_verification(message);
        }
    }

    /// Block up to `timeout` for one verification result. Returns whether
    /// one arrived.
    pub fn wait_for_verification(&mut self, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(message) => {
                self.apply_verification(message);
                true
            }
            None => false,
        }
    }

    fn apply_verification(&mut self, message: VerificationMessage) {
        let delivered = matches!(message, VerificationMessage::Delivered { result: Ok(()), .. });
        let outcome = self
            .state
            .wizard
            .handle_verification(message)
            .map(|snapshot| snapshot.cloned());

        match outcome {
            Ok(Some(snapshot)) => self.on_submitted(&snapshot),
            Ok(None) => {
                let contact = self.state.wizard.contact();
                if let Some(condition) = contact.condition() {
                    self.state.status_message = condition.message().to_string();
                } else if contact.is_verified() {
                    self.state.status_message = "Mobile number verified".to_string();
                } else if delivered && contact.is_prompt_open() {
                    self.state.status_message = format!(
                        "Code sent to {} {}",
                        self.state.country_code,
                        mask_mobile(&contact.info().mobile)
                    );
                }
            }
            Err(e) => {
                warn!("Verification result rejected: {}", e);
                self.state.status_message = e.to_string();
            }
        }
    }

    fn on_submitted(&mut self, snapshot: &QuoteSnapshot) {
        self.state.status_message = match &self.results_sink {
            Some(sink) => match sink.deliver(snapshot) {
                Ok(()) => UiText::SUBMITTED.to_string(),
                Err(e) => {
                    error!("Failed to deliver quote: {:#}", e);
                    format!("Quote submitted, but saving failed: {}", e)
                }
            },
            None => UiText::SUBMITTED.to_string(),
        };
    }

    // ---------------------------------------------------------------------
    // Key handling
    // ---------------------------------------------------------------------

    /// Handle one key press. Returns true when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        let screen = self.state.screen();
        let action = self.keybinding_context.action_for(screen, &key_event);

        if action == Some(KeyAction::Quit) {
            info!("Quit requested on {} screen", screen.name());
            return true;
        }

        if self.state.help_visible {
            if matches!(action, Some(KeyAction::Help)) || key_event.code == KeyCode::Esc {
                self.state.help_visible = false;
            }
            return false;
        }

        if self.state.info_visible {
            if matches!(action, Some(KeyAction::Info))
                || matches!(key_event.code, KeyCode::Esc | KeyCode::Enter)
            {
                self.state.info_visible = false;
            }
            return false;
        }

        match action {
            Some(KeyAction::Help) => self.state.help_visible = true,
            Some(KeyAction::Info) if screen != Screen::Results => self.state.info_visible = true,
            Some(action) => self.handle_action(screen, action),
            None if screen.takes_text() => self.handle_text_input(screen, key_event),
            None => {}
        }
        false
    }

    fn handle_action(&mut self, screen: Screen, action: KeyAction) {
        match screen {
            Screen::Configuration => self.handle_configuration_action(action),
            Screen::Rooms => self.handle_rooms_action(action),
            Screen::Package => self.handle_package_action(action),
            Screen::Contact => self.handle_contact_action(action),
            Screen::CodePrompt => self.handle_code_prompt_action(action),
            Screen::Results => {}
        }
    }

    fn advance(&mut self) {
        match self.state.wizard.advance() {
            Ok(step) => {
                self.state.sync_cursors();
                self.state.status_message.clear();
                debug!("Advanced to {}", step);
            }
            Err(e) => self.state.status_message = e.to_string(),
        }
    }

    fn retreat(&mut self) {
        match self.state.wizard.retreat() {
            Ok(_) => {
                self.state.sync_cursors();
                self.state.status_message.clear();
            }
            Err(e) => self.state.status_message = e.to_string(),
        }
    }

    fn handle_configuration_action(&mut self, action: KeyAction) {
        let state = &mut self.state;
        match action {
            KeyAction::NavigateUp if state.choosing_qualifier => {
                state.qualifier_cursor = state.qualifier_cursor.saturating_sub(1);
            }
            KeyAction::NavigateDown if state.choosing_qualifier => {
                state.qualifier_cursor =
                    (state.qualifier_cursor + 1).min(SizeQualifier::all().len() - 1);
            }
            KeyAction::NavigateUp => state.bhk_cursor = state.bhk_cursor.saturating_sub(1),
            KeyAction::NavigateDown => {
                state.bhk_cursor = (state.bhk_cursor + 1).min(BhkType::all().len() - 1);
            }
            KeyAction::Select if state.choosing_qualifier => {
                if let Some(qualifier) = state.qualifier_under_cursor() {
                    state.wizard.select_size_qualifier(qualifier);
                    state.choosing_qualifier = false;
                    if let Some(configuration) = state.wizard.configuration().value() {
                        state.status_message = format!("Selected {}", configuration);
                    }
                }
            }
            KeyAction::Select => {
                if let Some(bhk) = state.bhk_under_cursor() {
                    state.wizard.select_configuration(bhk);
                    if bhk.requires_qualifier() {
                        state.choosing_qualifier = true;
                        state.qualifier_cursor = 0;
                        state.status_message = format!("Is your {} Small or Large?", bhk);
                    } else {
                        state.choosing_qualifier = false;
                        state.status_message = format!("Selected {}", bhk);
                    }
                }
            }
            KeyAction::Back if state.choosing_qualifier => state.choosing_qualifier = false,
            KeyAction::Back => self.retreat(),
            KeyAction::Next => self.advance(),
            _ => {}
        }
    }

    fn handle_rooms_action(&mut self, action: KeyAction) {
        let state = &mut self.state;
        let room_count = Room::all().len();
        match action {
            KeyAction::NavigateUp => state.room_cursor = state.room_cursor.saturating_sub(1),
            KeyAction::NavigateDown => {
                state.room_cursor = (state.room_cursor + 1).min(room_count - 1);
            }
            KeyAction::Increment | KeyAction::Decrement => {
                let Some(room) = state.room_under_cursor() else {
                    return;
                };
                let rooms = state.wizard.rooms();
                let allowed = if action == KeyAction::Increment {
                    rooms.can_increment(room)
                } else {
                    rooms.can_decrement(room)
                };
                if !allowed {
                    let limits = rooms.limits();
                    state.status_message = format!(
                        "{} count must stay between {} and {}",
                        room, limits.min, limits.max
                    );
                    return;
                }
                let count = if action == KeyAction::Increment {
                    state.wizard.increment_room(room)
                } else {
                    state.wizard.decrement_room(room)
                };
                state.status_message = format!("{}: {}", room, count);
            }
            KeyAction::Next => self.advance(),
            KeyAction::Back => self.retreat(),
            _ => {}
        }
    }

    fn handle_package_action(&mut self, action: KeyAction) {
        let state = &mut self.state;
        match action {
            KeyAction::NavigateUp => {
                state.package_cursor = state.package_cursor.saturating_sub(1);
            }
            KeyAction::NavigateDown => {
                state.package_cursor =
                    (state.package_cursor + 1).min(crate::package::CATALOG.len() - 1);
            }
            KeyAction::Select => {
                if let Some(tier) = state.package_under_cursor() {
                    state.wizard.select_package(tier);
                    state.status_message = format!("Selected {}", tier);
                }
            }
            KeyAction::Next => self.advance(),
            KeyAction::Back => self.retreat(),
            _ => {}
        }
    }

    fn handle_contact_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::NextField => self.state.contact_field = self.state.contact_field.next(),
            KeyAction::PreviousField => {
                self.state.contact_field = self.state.contact_field.previous();
            }
            KeyAction::Submit if self.state.contact_field == ContactField::Mobile => {
                self.verify_mobile();
            }
            KeyAction::Submit => self.submit_contact(),
            KeyAction::Back => self.retreat(),
            _ => {}
        }
    }

    /// The "Verify" button next to the phone number.
    ///
    /// With a code already outstanding this brings the prompt back instead
    /// of sending another one; `R` in the prompt resends.
    fn verify_mobile(&mut self) {
        let contact = self.state.wizard.contact();
        if !contact.is_prompt_open() && !contact.is_waiting() && self.state.wizard.reopen_code_prompt()
        {
            debug!("Code prompt reopened");
            self.state.status_message.clear();
            return;
        }
        match self.state.wizard.request_code() {
            Ok(request) => {
                self.state.status_message = UiText::SENDING.to_string();
                self.dispatch(request);
            }
            Err(e) => self.state.status_message = e.to_string(),
        }
    }

    /// The "Get Estimate" button
    fn submit_contact(&mut self) {
        match self.state.wizard.submit() {
            Ok(SubmitProgress::Finished) => {
                if let Some(snapshot) = self.state.wizard.results().cloned() {
                    self.on_submitted(&snapshot);
                }
            }
            Ok(SubmitProgress::AwaitingCode(request)) => {
                self.state.status_message = UiText::SENDING.to_string();
                self.dispatch(request);
            }
            Ok(SubmitProgress::Incomplete) => {
                self.state.status_message =
                    "Please fill in your name, phone number and property name".to_string();
            }
            Err(e) => self.state.status_message = e.to_string(),
        }
    }

    fn handle_code_prompt_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => self.submit_code(),
            KeyAction::Resend => match self.state.wizard.resend_code() {
                Ok(request) => {
                    self.state.status_message = UiText::SENDING.to_string();
                    self.dispatch(request);
                }
                Err(e) => self.state.status_message = e.to_string(),
            },
            KeyAction::Cancel => {
                self.state.wizard.close_code_prompt();
                self.state.status_message.clear();
            }
            _ => {}
        }
    }

    fn submit_code(&mut self) {
        match self.state.wizard.submit_entered_code() {
            Ok(request) => {
                self.state.status_message = UiText::VERIFYING.to_string();
                self.dispatch(request);
            }
            Err(e) => self.state.status_message = e.to_string(),
        }
    }

    fn handle_text_input(&mut self, screen: Screen, key_event: KeyEvent) {
        if screen == Screen::CodePrompt {
            match key_event.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if self.state.wizard.push_code_digit(c) {
                        self.submit_code();
                    }
                }
                KeyCode::Backspace => self.state.wizard.pop_code_digit(),
                _ => {}
            }
            return;
        }

        let field = self.state.contact_field;
        match (field, key_event.code) {
            (ContactField::WhatsApp, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) => {
                let opt_in = !self.state.wizard.contact().info().whatsapp_opt_in;
                self.state.wizard.set_whatsapp_opt_in(opt_in);
            }
            (ContactField::WhatsApp, _) => {}
            (ContactField::Mobile, KeyCode::Char(c)) => {
                if c.is_ascii_digit() {
                    self.edit_field(field, |value| {
                        if value.len() < 10 {
                            value.push(c);
                        }
                    });
                }
            }
            (_, KeyCode::Char(c)) => self.edit_field(field, |value| value.push(c)),
            (_, KeyCode::Backspace) => self.edit_field(field, |value| {
                value.pop();
            }),
            _ => {}
        }
    }

    fn edit_field(&mut self, field: ContactField, edit: impl FnOnce(&mut String)) {
        let info = self.state.wizard.contact().info();
        let mut value = match field {
            ContactField::Name => info.name.clone(),
            ContactField::Email => info.email.clone(),
            ContactField::Mobile => info.mobile.clone(),
            ContactField::Address => info.address.clone(),
            ContactField::WhatsApp => return,
        };
        edit(&mut value);
        let wizard = &mut self.state.wizard;
        match field {
            ContactField::Name => wizard.set_name(value),
            ContactField::Email => wizard.set_email(value),
            ContactField::Mobile => wizard.set_mobile(value),
            ContactField::Address => wizard.set_address(value),
            ContactField::WhatsApp => {}
        }
    }
}
