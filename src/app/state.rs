//! Application state definitions
//!
//! The wizard data itself lives in [`WizardController`]; `AppState` only adds
//! what the terminal needs on top of it: cursors, focus and overlays.

use crate::types::{BhkType, PackageTier, Room, SizeQualifier};
use crate::wizard_state::{Step, WizardController};

/// What is currently on screen. Derived from the wizard, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Configuration,
    Rooms,
    Package,
    Contact,
    /// One-time code overlay on top of the contact form
    CodePrompt,
    Results,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Self::Configuration => "BHK Type",
            Self::Rooms => "Rooms to Design",
            Self::Package => "Package",
            Self::Contact => "Get Quote",
            Self::CodePrompt => "Verify OTP",
            Self::Results => "Estimate",
        }
    }

    /// Screens where printable keys are text input
    pub fn takes_text(self) -> bool {
        matches!(self, Self::Contact | Self::CodePrompt)
    }
}

/// Focusable contact form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactField {
    #[default]
    Name,
    Email,
    Mobile,
    WhatsApp,
    Address,
}

impl ContactField {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Name,
            Self::Email,
            Self::Mobile,
            Self::WhatsApp,
            Self::Address,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Mobile => "Phone number",
            Self::WhatsApp => "Send me updates on WhatsApp",
            Self::Address => "Property Name",
        }
    }

    fn position(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field, wrapping around
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    pub fn previous(self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub wizard: WizardController,
    /// Cursor in the BHK list
    pub bhk_cursor: usize,
    /// Cursor in the Small/Large sub-choice
    pub qualifier_cursor: usize,
    /// Whether keys drive the size sub-choice instead of the BHK list
    pub choosing_qualifier: bool,
    pub room_cursor: usize,
    pub package_cursor: usize,
    pub contact_field: ContactField,
    pub help_visible: bool,
    /// Per-step "know more" text
    pub info_visible: bool,
    /// One-line feedback under the screen
    pub status_message: String,
    /// Shown before the mobile number
    pub country_code: String,
}

impl AppState {
    pub fn new(wizard: WizardController, country_code: impl Into<String>) -> Self {
        Self {
            wizard,
            bhk_cursor: 0,
            qualifier_cursor: 0,
            choosing_qualifier: false,
            room_cursor: 0,
            package_cursor: 0,
            contact_field: ContactField::default(),
            help_visible: false,
            info_visible: false,
            status_message: String::new(),
            country_code: country_code.into(),
        }
    }

    pub fn screen(&self) -> Screen {
        if self.wizard.is_finished() {
            return Screen::Results;
        }
        match self.wizard.step() {
            Step::Configuration => Screen::Configuration,
            Step::Rooms => Screen::Rooms,
            Step::Package => Screen::Package,
            Step::Contact if self.wizard.contact().is_prompt_open() => Screen::CodePrompt,
            Step::Contact => Screen::Contact,
        }
    }

    pub fn bhk_under_cursor(&self) -> Option<BhkType> {
        BhkType::all().get(self.bhk_cursor).copied()
    }

    pub fn qualifier_under_cursor(&self) -> Option<SizeQualifier> {
        SizeQualifier::all().get(self.qualifier_cursor).copied()
    }

    pub fn room_under_cursor(&self) -> Option<Room> {
        Room::all().get(self.room_cursor).copied()
    }

    pub fn package_under_cursor(&self) -> Option<PackageTier> {
        crate::package::CATALOG
            .get(self.package_cursor)
            .map(|info| info.tier)
    }

    /// Put list cursors on the current choices after a step change.
    pub fn sync_cursors(&mut self) {
        if let Some(bhk) = self.wizard.configuration().bhk() {
            if let Some(i) = BhkType::all().iter().position(|b| *b == bhk) {
                self.bhk_cursor = i;
            }
        }
        if let Some(tier) = self.wizard.package().selected() {
            if let Some(i) = crate::package::CATALOG.iter().position(|p| p.tier == tier) {
                self.package_cursor = i;
            }
        }
        self.choosing_qualifier = self.wizard.configuration().awaiting_qualifier();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_field_cycle() {
        let mut field = ContactField::Name;
        for _ in 0..ContactField::all().len() {
            field = field.next();
        }
        assert_eq!(field, ContactField::Name);
        assert_eq!(ContactField::Name.previous(), ContactField::Address);
    }

    #[test]
    fn test_screen_follows_wizard() {
        let mut state = AppState::new(WizardController::new(), "+91");
        assert_eq!(state.screen(), Screen::Configuration);
        state.wizard.select_configuration(BhkType::OneBhk);
        state.wizard.advance().unwrap();
        assert_eq!(state.screen(), Screen::Rooms);
    }

    #[test]
    fn test_sync_cursors_tracks_package() {
        let mut state = AppState::new(WizardController::new(), "+91");
        state.wizard.select_configuration(BhkType::FivePlusBhk);
        state.wizard.advance().unwrap();
        state.wizard.advance().unwrap();
        state.wizard.select_package(PackageTier::Luxury);
        state.sync_cursors();
        assert_eq!(state.package_under_cursor(), Some(PackageTier::Luxury));
        assert_eq!(state.bhk_under_cursor(), Some(BhkType::FivePlusBhk));
    }
}
