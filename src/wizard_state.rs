//! Wizard State Machine
//!
//! `WizardController` is the single owner of everything the quote wizard
//! collects. Screens read through accessors and change state only through
//! the named operations below.
//!
//! # Step Flow
//!
//! ```text
//! Configuration --(configuration complete)--> Rooms
//!     Rooms --(always)--> Package   (first package auto-selected on entry)
//!     Package --(package chosen)--> Contact
//!     Contact --(verified + complete submission)--> Results (terminal)
//!
//! (retreat() goes back one step from anywhere but the first step and Results)
//! ```

use crate::configuration::ConfigurationSelector;
use crate::contact::{
    ContactFormValidator, ContactInfo, SubmissionSignal, SubmitOutcome, VerificationError,
};
use crate::package::PackageSelector;
use crate::rooms::{RoomCountStore, RoomCounts};
use crate::types::{BhkType, Configuration, PackageTier, Room, SizeQualifier};
use crate::verification::{VerificationMessage, VerificationRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Step {
    Configuration = 0,
    Rooms = 1,
    Package = 2,
    Contact = 3,
}

impl Step {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 4;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Configuration),
            1 => Some(Self::Rooms),
            2 => Some(Self::Package),
            3 => Some(Self::Contact),
            _ => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Configuration => None,
            _ => Self::from_index(self.index() - 1),
        }
    }

    /// Short label for the progress stepper
    pub const fn label(self) -> &'static str {
        match self {
            Self::Configuration => "BHK TYPE",
            Self::Rooms => "ROOMS TO DESIGN",
            Self::Package => "PACKAGE",
            Self::Contact => "GET QUOTE",
        }
    }

    /// Screen heading
    pub const fn title(self) -> &'static str {
        match self {
            Self::Configuration => "Select your BHK type",
            Self::Rooms => "Select the rooms you'd like us to design",
            Self::Package => "Pick your package",
            Self::Contact => "Your estimate is almost ready",
        }
    }

    pub const fn all() -> &'static [Self] {
        &[Self::Configuration, Self::Rooms, Self::Package, Self::Contact]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Errors that can occur during step transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardTransitionError {
    #[error("Select a BHK type (and size, where offered) before continuing")]
    ConfigurationIncomplete,

    #[error("Select a package before continuing")]
    NoPackageSelected,

    #[error("{step} is the last step; submit the form instead")]
    TerminalStep { step: Step },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Quote has been submitted; the wizard is finished")]
    Finished,

    #[error("Submission is only possible from the {expected} step (currently at {actual})")]
    WrongStep { expected: Step, actual: Step },
}

/// Errors from contact-step operations on the wizard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactStepError {
    #[error(transparent)]
    Transition(#[from] WizardTransitionError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

/// Immutable hand-off to the results view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub configuration: Configuration,
    pub rooms: RoomCounts,
    pub package: PackageTier,
    pub contact: ContactInfo,
}

/// Progress of the explicit submit action at the contact step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitProgress {
    /// Results are ready
    Finished,
    /// Verification started; dispatch the request
    AwaitingCode(VerificationRequest),
    /// Required contact fields missing
    Incomplete,
}

/// Owns the whole wizard state and enforces legal transitions.
///
/// # Example
///
/// ```
/// use quotewizard::types::{BhkType, SizeQualifier};
/// use quotewizard::wizard_state::{Step, WizardController};
///
/// let mut wizard = WizardController::new();
/// assert!(wizard.advance().is_err());
///
/// wizard.select_configuration(BhkType::FourBhk);
/// wizard.select_size_qualifier(SizeQualifier::Large);
/// assert_eq!(wizard.advance(), Ok(Step::Rooms));
/// ```
#[derive(Debug, Clone)]
pub struct WizardController {
    step: Step,
    configuration: ConfigurationSelector,
    rooms: RoomCountStore,
    package: PackageSelector,
    contact: ContactFormValidator,
    results: Option<QuoteSnapshot>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self::with_contact(ContactFormValidator::default())
    }

    /// Start with a preconfigured contact validator (e.g. custom code length).
    pub fn with_contact(contact: ContactFormValidator) -> Self {
        Self {
            step: Step::Configuration,
            configuration: ConfigurationSelector::new(),
            rooms: RoomCountStore::new(),
            package: PackageSelector::new(),
            contact,
            results: None,
        }
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn configuration(&self) -> &ConfigurationSelector {
        &self.configuration
    }

    pub fn rooms(&self) -> &RoomCountStore {
        &self.rooms
    }

    pub fn package(&self) -> &PackageSelector {
        &self.package
    }

    pub fn contact(&self) -> &ContactFormValidator {
        &self.contact
    }

    pub fn results(&self) -> Option<&QuoteSnapshot> {
        self.results.as_ref()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.results.is_some()
    }

    /// Whether `advance()` would succeed right now
    pub fn can_advance(&self) -> bool {
        self.check_advance().is_ok()
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_finished() && self.step.previous().is_some()
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    fn check_advance(&self) -> Result<Step, WizardTransitionError> {
        if self.is_finished() {
            return Err(WizardTransitionError::Finished);
        }
        match self.step {
            Step::Configuration if !self.configuration.is_complete() => {
                Err(WizardTransitionError::ConfigurationIncomplete)
            }
            Step::Package if self.package.selected().is_none() => {
                Err(WizardTransitionError::NoPackageSelected)
            }
            Step::Contact => Err(WizardTransitionError::TerminalStep { step: self.step }),
            step => step
                .next()
                .ok_or(WizardTransitionError::TerminalStep { step }),
        }
    }

    /// Move forward one step if the current step is valid.
    ///
    /// # Errors
    ///
    /// - `ConfigurationIncomplete` at the first step without a complete configuration
    /// - `TerminalStep` at the contact step (use `submit()`)
    /// - `Finished` once results are shown
    pub fn advance(&mut self) -> Result<Step, WizardTransitionError> {
        let next = self.check_advance()?;
        self.enter(next);
        Ok(next)
    }

    /// Move back one step. Never validates.
    pub fn retreat(&mut self) -> Result<Step, WizardTransitionError> {
        if self.is_finished() {
            return Err(WizardTransitionError::Finished);
        }
        let previous = self
            .step
            .previous()
            .ok_or(WizardTransitionError::AtFirstStep)?;
        if self.step == Step::Contact {
            self.contact.close_prompt();
        }
        self.enter(previous);
        Ok(previous)
    }

    fn enter(&mut self, step: Step) {
        debug!("Wizard step {} -> {}", self.step, step);
        self.step = step;
        if step == Step::Package {
            self.package.ensure_default();
        }
    }

    // ---------------------------------------------------------------------
    // Step operations
    // ---------------------------------------------------------------------

    /// Choose a BHK type; resets room counts to that type's defaults.
    pub fn select_configuration(&mut self, bhk: BhkType) {
        if self.is_finished() {
            return;
        }
        self.configuration.select(bhk);
        self.rooms.set_configuration(Some(bhk));
    }

    /// Choose the size for a 2/3/4 BHK. Returns whether it applied.
    pub fn select_size_qualifier(&mut self, qualifier: SizeQualifier) -> bool {
        if self.is_finished() {
            return false;
        }
        let applied = self.configuration.select_size_qualifier(qualifier);
        if applied {
            self.rooms.set_configuration(self.configuration.bhk());
        }
        applied
    }

    /// Apply a complete configuration at once.
    pub fn set_configuration(&mut self, configuration: Configuration) {
        if self.is_finished() {
            return;
        }
        self.configuration.set(configuration);
        self.rooms.set_configuration(Some(configuration.bhk()));
    }

    pub fn increment_room(&mut self, room: Room) -> u8 {
        if self.is_finished() {
            return self.rooms.count(room);
        }
        self.rooms.increment(room)
    }

    pub fn decrement_room(&mut self, room: Room) -> u8 {
        if self.is_finished() {
            return self.rooms.count(room);
        }
        self.rooms.decrement(room)
    }

    pub fn set_room_count(&mut self, room: Room, count: i32) -> u8 {
        if self.is_finished() {
            return self.rooms.count(room);
        }
        self.rooms.set_count(room, count)
    }

    pub fn select_package(&mut self, tier: PackageTier) {
        if self.is_finished() {
            return;
        }
        self.package.select(tier);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if !self.is_finished() {
            self.contact.set_name(name);
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if !self.is_finished() {
            self.contact.set_email(email);
        }
    }

    /// Change the mobile number; a different number resets verification.
    pub fn set_mobile(&mut self, mobile: impl Into<String>) {
        if !self.is_finished() {
            self.contact.set_mobile(mobile);
        }
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        if !self.is_finished() {
            self.contact.set_address(address);
        }
    }

    pub fn set_whatsapp_opt_in(&mut self, opt_in: bool) {
        if !self.is_finished() {
            self.contact.set_whatsapp_opt_in(opt_in);
        }
    }

    /// Replace every contact field at once (headless answers).
    pub fn fill_contact(&mut self, info: ContactInfo) {
        if !self.is_finished() {
            self.contact.fill(info);
        }
    }

    // ---------------------------------------------------------------------
    // Verification and submission
    // ---------------------------------------------------------------------

    /// Verification and submission only happen on the contact step.
    fn check_contact_step(&self) -> Result<(), WizardTransitionError> {
        if self.is_finished() {
            return Err(WizardTransitionError::Finished);
        }
        if self.step != Step::Contact {
            return Err(WizardTransitionError::WrongStep {
                expected: Step::Contact,
                actual: self.step,
            });
        }
        Ok(())
    }

    /// Everything `complete()` needs, checked before a signal can be taken.
    fn check_submittable(&self) -> Result<(Configuration, PackageTier), WizardTransitionError> {
        self.check_contact_step()?;
        let configuration = self
            .configuration
            .value()
            .ok_or(WizardTransitionError::ConfigurationIncomplete)?;
        let package = self
            .package
            .selected()
            .ok_or(WizardTransitionError::NoPackageSelected)?;
        Ok((configuration, package))
    }

    /// Start verification for the mobile currently in the form.
    pub fn request_code(&mut self) -> Result<VerificationRequest, ContactStepError> {
        self.check_contact_step()?;
        let mobile = self.contact.info().mobile.clone();
        Ok(self.contact.request_code(&mobile)?)
    }

    /// Send the code again to the number being verified.
    pub fn resend_code(&mut self) -> Result<VerificationRequest, ContactStepError> {
        self.check_contact_step()?;
        Ok(self.contact.resend_code()?)
    }

    /// Confirm `code` against the outstanding request.
    pub fn submit_code(&mut self, code: &str) -> Result<VerificationRequest, ContactStepError> {
        self.check_contact_step()?;
        Ok(self.contact.submit_code(code)?)
    }

    /// Confirm whatever has been typed into the code prompt.
    pub fn submit_entered_code(&mut self) -> Result<VerificationRequest, ContactStepError> {
        self.check_contact_step()?;
        Ok(self.contact.submit_entered_code()?)
    }

    /// Type one digit into the code prompt. Returns true once the code is full.
    pub fn push_code_digit(&mut self, c: char) -> bool {
        if self.check_contact_step().is_err() {
            return false;
        }
        self.contact.push_code_digit(c);
        self.contact.entered_code().len() == self.contact.code_length()
    }

    pub fn pop_code_digit(&mut self) {
        if self.check_contact_step().is_ok() {
            self.contact.pop_code_digit();
        }
    }

    /// Close the code prompt, abandoning any call in flight.
    pub fn close_code_prompt(&mut self) {
        self.contact.close_prompt();
    }

    /// Show the code prompt again for the code already sent.
    pub fn reopen_code_prompt(&mut self) -> bool {
        self.check_contact_step().is_ok() && self.contact.reopen_prompt()
    }

    /// Feed a capability completion back into the form.
    ///
    /// Completes the wizard when it yields the submission signal.
    pub fn handle_verification(
        &mut self,
        message: VerificationMessage,
    ) -> Result<Option<&QuoteSnapshot>, WizardTransitionError> {
        if self.is_finished() {
            debug!("Verification message after submission ignored");
            return Ok(None);
        }
        match self.contact.on_message(message) {
            Some(signal) => self.complete(signal).map(Some),
            None => Ok(None),
        }
    }

    /// Explicit submit at the contact step.
    ///
    /// # Errors
    ///
    /// - `Transition` away from the contact step or once finished; the
    ///   contact form is left untouched
    /// - `Verification` for an invalid mobile or a repeated submission
    pub fn submit(&mut self) -> Result<SubmitProgress, ContactStepError> {
        self.check_submittable()?;
        match self.contact.submit()? {
            SubmitOutcome::Submitted(signal) => {
                self.complete(signal)?;
                Ok(SubmitProgress::Finished)
            }
            SubmitOutcome::CodeRequested(request) => Ok(SubmitProgress::AwaitingCode(request)),
            SubmitOutcome::Incomplete => Ok(SubmitProgress::Incomplete),
        }
    }

    /// Consume the submission signal and switch to results.
    pub fn complete(
        &mut self,
        signal: SubmissionSignal,
    ) -> Result<&QuoteSnapshot, WizardTransitionError> {
        let (configuration, package) = self.check_submittable()?;
        let snapshot = QuoteSnapshot {
            configuration,
            rooms: self.rooms.counts().clone(),
            package,
            contact: signal.into_contact(),
        };
        info!(
            "Quote submitted: {} / {} for {}",
            snapshot.configuration, snapshot.package, snapshot.contact.name
        );
        Ok(&*self.results.insert(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_contact() -> WizardController {
        let mut wizard = WizardController::new();
        wizard.select_configuration(BhkType::OneBhk);
        wizard.advance().expect("Rooms");
        wizard.advance().expect("Package");
        wizard.advance().expect("Contact");
        wizard
    }

    #[test]
    fn test_step_chain() {
        let mut current = Step::Configuration;
        let mut count = 0;
        while let Some(next) = current.next() {
            current = next;
            count += 1;
        }
        assert_eq!(current, Step::Contact);
        assert_eq!(count, Step::TOTAL_STEPS - 1);
        assert_eq!(Step::Configuration.previous(), None);
    }

    #[test]
    fn test_cannot_advance_without_configuration() {
        let mut wizard = WizardController::new();
        assert_eq!(
            wizard.advance(),
            Err(WizardTransitionError::ConfigurationIncomplete)
        );

        wizard.select_configuration(BhkType::FourBhk);
        assert!(!wizard.can_advance());
        wizard.select_size_qualifier(SizeQualifier::Large);
        assert_eq!(wizard.advance(), Ok(Step::Rooms));
    }

    #[test]
    fn test_package_defaults_on_entry_only_once() {
        let mut wizard = WizardController::new();
        wizard.select_configuration(BhkType::FivePlusBhk);
        wizard.advance().expect("Rooms");
        assert_eq!(wizard.package().selected(), None);
        wizard.advance().expect("Package");
        assert_eq!(wizard.package().selected(), Some(PackageTier::Basic));

        wizard.select_package(PackageTier::Luxury);
        wizard.advance().expect("Contact");
        wizard.retreat().expect("Package");
        assert_eq!(wizard.package().selected(), Some(PackageTier::Luxury));
    }

    #[test]
    fn test_contact_is_terminal_for_advance() {
        let mut wizard = at_contact();
        assert_eq!(
            wizard.advance(),
            Err(WizardTransitionError::TerminalStep {
                step: Step::Contact
            })
        );
    }

    #[test]
    fn test_retreat_from_first_step_fails() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.retreat(), Err(WizardTransitionError::AtFirstStep));
    }

    #[test]
    fn test_retreat_never_validates() {
        let mut wizard = at_contact();
        wizard.retreat().expect("Package");
        wizard.retreat().expect("Rooms");
        wizard.retreat().expect("Configuration");
        wizard.select_configuration(BhkType::ThreeBhk);
        assert_eq!(wizard.step(), Step::Configuration);
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_qualifier_resets_rooms_to_defaults() {
        let mut wizard = WizardController::new();
        wizard.select_configuration(BhkType::ThreeBhk);
        wizard.decrement_room(Room::Bedroom);
        wizard.select_size_qualifier(SizeQualifier::Small);
        assert_eq!(wizard.rooms().count(Room::Bedroom), 3);
    }

    #[test]
    fn test_complete_requires_contact_step() {
        let mut wizard = at_contact();
        wizard.set_name("Asha");
        wizard.set_address("Palm Residency");
        wizard.set_mobile("9876543210");

        let req = match wizard.submit() {
            Ok(SubmitProgress::AwaitingCode(req)) => req,
            other => panic!("expected code request, got {:?}", other),
        };
        let snapshot = wizard
            .handle_verification(VerificationMessage::Confirmed {
                generation: req.generation + 1,
                result: Ok(true),
            })
            .expect("no transition error");
        assert!(snapshot.is_none());

        let confirm = wizard.submit_code("123456").expect("code");
        let snapshot = wizard
            .handle_verification(VerificationMessage::Confirmed {
                generation: confirm.generation,
                result: Ok(true),
            })
            .expect("complete")
            .cloned()
            .expect("snapshot");
        assert_eq!(snapshot.configuration.to_string(), "1 BHK");
        assert_eq!(snapshot.package, PackageTier::Basic);
        assert!(wizard.is_finished());
        assert_eq!(wizard.advance(), Err(WizardTransitionError::Finished));
        assert_eq!(wizard.retreat(), Err(WizardTransitionError::Finished));
    }

    #[test]
    fn test_submit_away_from_contact_leaves_form_untouched() {
        let mut wizard = at_contact();
        wizard.set_mobile("9876543210");
        let request = wizard.request_code().expect("request");
        wizard.handle_verification(VerificationMessage::Delivered {
            generation: request.generation,
            result: Ok(()),
        })
        .expect("delivered");
        let confirm = wizard.submit_code("123456").expect("code");
        wizard
            .handle_verification(VerificationMessage::Confirmed {
                generation: confirm.generation,
                result: Ok(true),
            })
            .expect("verified");
        assert!(wizard.contact().is_verified());

        wizard.set_name("Asha");
        wizard.set_address("Palm Residency");
        wizard.retreat().expect("Package");
        assert_eq!(
            wizard.submit(),
            Err(ContactStepError::Transition(WizardTransitionError::WrongStep {
                expected: Step::Contact,
                actual: Step::Package,
            }))
        );

        wizard.advance().expect("Contact");
        assert_eq!(wizard.submit(), Ok(SubmitProgress::Finished));
        assert!(wizard.is_finished());
        assert_eq!(
            wizard.submit(),
            Err(ContactStepError::Transition(WizardTransitionError::Finished))
        );
    }

    #[test]
    fn test_contact_operations_frozen_after_submission() {
        let mut wizard = at_contact();
        wizard.set_name("Asha");
        wizard.set_address("Palm Residency");
        wizard.set_mobile("9876543210");
        wizard.request_code().expect("request");
        let confirm = wizard.submit_code("123456").expect("code");
        wizard
            .handle_verification(VerificationMessage::Confirmed {
                generation: confirm.generation,
                result: Ok(true),
            })
            .expect("complete");
        assert!(wizard.is_finished());

        wizard.set_name("Someone Else");
        wizard.set_mobile("9123456789");
        assert_eq!(wizard.contact().info().name, "Asha");
        assert!(wizard.contact().is_verified());
        assert!(!wizard.push_code_digit('1'));
        assert_eq!(
            wizard.resend_code(),
            Err(ContactStepError::Transition(WizardTransitionError::Finished))
        );
    }

    #[test]
    fn test_request_code_only_on_contact_step() {
        let mut wizard = WizardController::new();
        wizard.set_mobile("9876543210");
        assert!(matches!(
            wizard.request_code(),
            Err(ContactStepError::Transition(WizardTransitionError::WrongStep { .. }))
        ));
        assert_eq!(wizard.contact().state(), crate::contact::VerificationState::Unstarted);
    }

    #[test]
    fn test_retreat_from_contact_abandons_pending_confirmation() {
        let mut wizard = at_contact();
        wizard.set_name("Asha");
        wizard.set_address("Palm Residency");
        wizard.set_mobile("9876543210");
        wizard.request_code().expect("request");
        let confirm = wizard.submit_code("123456").expect("code");

        wizard.retreat().expect("Package");
        let result = wizard
            .handle_verification(VerificationMessage::Confirmed {
                generation: confirm.generation,
                result: Ok(true),
            })
            .expect("no error");
        assert!(result.is_none());
        assert!(!wizard.is_finished());
    }
}
