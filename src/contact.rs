//! Contact form validation and one-time code verification
//!
//! # Verification State Flow
//!
//! ```text
//! Unstarted --request_code--> CodeSent --match--> Verified
//!                               |  ^
//!               mismatch (stay) |  | submit_code / resend_code
//!                               v  |
//!                       confirmation failure --> Failed
//! ```
//!
//! Delivery failures do not block the user: the state still moves to
//! `CodeSent` and the form runs in degraded mode with manual code entry.
//!
//! # Final Submission
//!
//! A [`SubmissionSignal`] can only be produced here, and at most once per
//! successful verification, regardless of how many times a completion or a
//! submit action is replayed.

use crate::verification::{
    ConfirmationError, DeliveryError, RequestKind, VerificationMessage, VerificationRequest,
    mask_mobile,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Default number of digits in a one-time code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Contact details collected at the last step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    /// Optional; an empty string is valid
    pub email: String,
    /// 10-digit national mobile number, no country prefix
    pub mobile: String,
    /// Property name or address
    pub address: String,
    pub whatsapp_opt_in: bool,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            mobile: String::new(),
            address: String::new(),
            whatsapp_opt_in: true,
        }
    }
}

/// `local@domain.tld` shape, or empty (email is optional).
pub fn is_valid_email(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Exactly 10 ASCII digits, the first one 6-9.
pub fn is_valid_mobile(s: &str) -> bool {
    s.len() == 10
        && s.bytes().all(|b| b.is_ascii_digit())
        && matches!(s.as_bytes()[0], b'6'..=b'9')
}

/// Name, valid mobile and address present. Email is not required.
pub fn is_form_complete(info: &ContactInfo) -> bool {
    !info.name.trim().is_empty() && is_valid_mobile(&info.mobile) && !info.address.trim().is_empty()
}

/// Local validation failure, surfaced inline next to the mobile field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please enter a valid 10-digit mobile number starting with 6-9")]
pub struct InvalidMobileError {
    pub mobile: String,
}

/// Where the one-time code flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VerificationState {
    #[default]
    Unstarted,
    CodeSent,
    Verified,
    Failed,
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unstarted => "Not verified",
            Self::CodeSent => "Code sent",
            Self::Verified => "Verified",
            Self::Failed => "Verification failed",
        };
        write!(f, "{}", s)
    }
}

/// Non-fatal condition shown alongside the code prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationCondition {
    /// Delivery failed; code may still be entered manually
    DeliveryFailed(DeliveryError),
    /// Entered code did not match; input cleared, retry allowed
    CodeMismatch,
    /// Confirmation capability failed; retry allowed
    ConfirmationFailed(ConfirmationError),
}

impl VerificationCondition {
    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::DeliveryFailed(_) => "Could not send the code. You can still enter it manually.",
            Self::CodeMismatch => "Invalid OTP. Please try again.",
            Self::ConfirmationFailed(_) => "Error verifying OTP. Please try again.",
        }
    }
}

/// Errors from verification operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error(transparent)]
    InvalidMobile(#[from] InvalidMobileError),

    #[error("No code has been requested yet")]
    NotStarted,

    #[error("Not waiting for a code (state: {state})")]
    NotAwaitingCode { state: VerificationState },

    #[error("Mobile number is already verified")]
    AlreadyVerified,

    #[error("Code must be exactly {expected} digits")]
    IncompleteCode { expected: usize },

    #[error("Quote request has already been submitted")]
    AlreadySubmitted,
}

/// Proof that a verified, complete contact form may be submitted.
///
/// Only [`ContactFormValidator`] can create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSignal {
    contact: ContactInfo,
}

impl SubmissionSignal {
    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn into_contact(self) -> ContactInfo {
        self.contact
    }
}

/// Result of the explicit submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Verified and complete: hand off to results
    Submitted(SubmissionSignal),
    /// Not verified yet: a code request was started
    CodeRequested(VerificationRequest),
    /// Verified but required fields are still missing
    Incomplete,
}

/// Contact fields plus the verification state machine.
#[derive(Debug, Clone)]
pub struct ContactFormValidator {
    info: ContactInfo,
    state: VerificationState,
    condition: Option<VerificationCondition>,
    mobile_error: Option<InvalidMobileError>,
    entered_code: String,
    code_length: usize,
    /// Last issued request generation
    generation: u64,
    /// Generation still awaited; anything else is stale
    awaiting: Option<u64>,
    prompt_open: bool,
    submission_fired: bool,
}

impl Default for ContactFormValidator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl ContactFormValidator {
    pub fn new(code_length: usize) -> Self {
        Self {
            info: ContactInfo::default(),
            state: VerificationState::Unstarted,
            condition: None,
            mobile_error: None,
            entered_code: String::new(),
            code_length,
            generation: 0,
            awaiting: None,
            prompt_open: false,
            submission_fired: false,
        }
    }

    // ---------------------------------------------------------------------
    // Fields
    // ---------------------------------------------------------------------

    pub fn info(&self) -> &ContactInfo {
        &self.info
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.info.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.info.email = email.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.info.address = address.into();
    }

    pub fn set_whatsapp_opt_in(&mut self, opt_in: bool) {
        self.info.whatsapp_opt_in = opt_in;
    }

    /// Change the mobile number.
    ///
    /// Clears the inline mobile error. A different number invalidates any
    /// verification progress, since the old code belongs to the old number.
    pub fn set_mobile(&mut self, mobile: impl Into<String>) {
        let mobile = mobile.into();
        self.mobile_error = None;
        if mobile == self.info.mobile {
            return;
        }
        self.info.mobile = mobile;
        if self.state != VerificationState::Unstarted {
            debug!("Mobile changed, verification reset from {}", self.state);
            self.state = VerificationState::Unstarted;
            self.condition = None;
            self.entered_code.clear();
            self.awaiting = None;
            self.prompt_open = false;
            self.submission_fired = false;
        }
    }

    /// Replace every field at once (headless answers).
    pub fn fill(&mut self, info: ContactInfo) {
        let mobile = info.mobile.clone();
        self.set_name(info.name);
        self.set_email(info.email);
        self.set_address(info.address);
        self.set_whatsapp_opt_in(info.whatsapp_opt_in);
        self.set_mobile(mobile);
    }

    pub fn is_complete(&self) -> bool {
        is_form_complete(&self.info)
    }

    pub fn mobile_error(&self) -> Option<&InvalidMobileError> {
        self.mobile_error.as_ref()
    }

    // ---------------------------------------------------------------------
    // Verification state
    // ---------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> VerificationState {
        self.state
    }

    pub fn condition(&self) -> Option<&VerificationCondition> {
        self.condition.as_ref()
    }

    /// Delivery failed for the current code; manual entry only
    pub fn is_degraded(&self) -> bool {
        matches!(self.condition, Some(VerificationCondition::DeliveryFailed(_)))
    }

    pub fn is_verified(&self) -> bool {
        self.state == VerificationState::Verified
    }

    /// A capability call is in flight
    pub fn is_waiting(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt_open
    }

    pub fn entered_code(&self) -> &str {
        &self.entered_code
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Append a digit to the code being typed. Non-digits and overflow are ignored.
    pub fn push_code_digit(&mut self, c: char) {
        if c.is_ascii_digit() && self.entered_code.len() < self.code_length {
            self.entered_code.push(c);
            self.condition = None;
        }
    }

    pub fn pop_code_digit(&mut self) {
        self.entered_code.pop();
    }

    fn issue(&mut self, kind: RequestKind) -> VerificationRequest {
        self.generation += 1;
        if let Some(previous) = self.awaiting.replace(self.generation) {
            debug!("Request {} superseded by {}", previous, self.generation);
        }
        VerificationRequest {
            generation: self.generation,
            kind,
        }
    }

    /// Validate `mobile` and start code delivery to it.
    ///
    /// # Errors
    ///
    /// - `InvalidMobile` if the number fails the format check; nothing is sent
    /// - `AlreadyVerified` once the number has been verified
    pub fn request_code(&mut self, mobile: &str) -> Result<VerificationRequest, VerificationError> {
        if self.state == VerificationState::Verified && mobile == self.info.mobile {
            return Err(VerificationError::AlreadyVerified);
        }
        if !is_valid_mobile(mobile) {
            let err = InvalidMobileError {
                mobile: mobile.to_string(),
            };
            self.mobile_error = Some(err.clone());
            return Err(err.into());
        }

        self.set_mobile(mobile);
        self.state = VerificationState::CodeSent;
        self.condition = None;
        self.entered_code.clear();
        self.prompt_open = true;
        info!("Requesting code for {}", mask_mobile(mobile));

        Ok(self.issue(RequestKind::Deliver {
            mobile: mobile.to_string(),
        }))
    }

    /// Send the code again to the current number.
    ///
    /// Clears any error condition and the partially typed code.
    pub fn resend_code(&mut self) -> Result<VerificationRequest, VerificationError> {
        match self.state {
            VerificationState::Unstarted => return Err(VerificationError::NotStarted),
            VerificationState::Verified => return Err(VerificationError::AlreadyVerified),
            VerificationState::CodeSent | VerificationState::Failed => {}
        }

        self.state = VerificationState::CodeSent;
        self.condition = None;
        self.entered_code.clear();
        self.prompt_open = true;
        info!("Resending code to {}", mask_mobile(&self.info.mobile));

        let mobile = self.info.mobile.clone();
        Ok(self.issue(RequestKind::Deliver { mobile }))
    }

    /// Submit an entered code for confirmation.
    ///
    /// Allowed from `CodeSent`, or from `Failed` as a retry (which re-enters
    /// `CodeSent`).
    pub fn submit_code(&mut self, code: &str) -> Result<VerificationRequest, VerificationError> {
        if !matches!(self.state, VerificationState::CodeSent | VerificationState::Failed) {
            return Err(VerificationError::NotAwaitingCode { state: self.state });
        }
        if code.len() != self.code_length || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerificationError::IncompleteCode {
                expected: self.code_length,
            });
        }

        if self.state == VerificationState::Failed {
            debug!("Retrying confirmation after failure");
            self.state = VerificationState::CodeSent;
        }
        self.entered_code = code.to_string();
        self.condition = None;
        Ok(self.issue(RequestKind::Confirm {
            code: code.to_string(),
        }))
    }

    /// Submit whatever has been typed into the prompt.
    pub fn submit_entered_code(&mut self) -> Result<VerificationRequest, VerificationError> {
        let code = self.entered_code.clone();
        self.submit_code(&code)
    }

    /// Close the code prompt.
    ///
    /// In-flight requests keep running but their responses are discarded.
    pub fn close_prompt(&mut self) {
        if let Some(generation) = self.awaiting.take() {
            debug!("Prompt closed, abandoning request {}", generation);
        }
        self.prompt_open = false;
    }

    /// Reopen the prompt after it was closed, if a code is outstanding.
    ///
    /// Issues no request; the code already sent stays valid.
    pub fn reopen_prompt(&mut self) -> bool {
        if matches!(self.state, VerificationState::CodeSent | VerificationState::Failed) {
            self.prompt_open = true;
        }
        self.prompt_open
    }

    fn accept(&mut self, generation: u64) -> bool {
        if self.awaiting == Some(generation) {
            self.awaiting = None;
            true
        } else {
            debug!(
                "Ignoring stale verification response {} (awaiting {:?})",
                generation, self.awaiting
            );
            false
        }
    }

    /// Apply a delivery completion. Returns false if it was stale.
    pub fn on_delivery_result(
        &mut self,
        generation: u64,
        result: Result<(), DeliveryError>,
    ) -> bool {
        if !self.accept(generation) {
            return false;
        }
        match result {
            Ok(()) => info!("Code delivered to {}", mask_mobile(&self.info.mobile)),
            Err(e) => {
                warn!("Code delivery failed, continuing with manual entry: {}", e);
                self.condition = Some(VerificationCondition::DeliveryFailed(e));
            }
        }
        true
    }

    /// Apply a confirmation completion.
    ///
    /// On a match the state becomes `Verified` and, if the form is complete,
    /// the one-shot submission signal is returned.
    pub fn on_confirmation_result(
        &mut self,
        generation: u64,
        result: Result<bool, ConfirmationError>,
    ) -> Option<SubmissionSignal> {
        if !self.accept(generation) {
            return None;
        }
        self.entered_code.clear();
        match result {
            Ok(true) => {
                info!("Mobile {} verified", mask_mobile(&self.info.mobile));
                self.state = VerificationState::Verified;
                self.condition = None;
                self.prompt_open = false;
                self.take_submission()
            }
            Ok(false) => {
                debug!("Code mismatch");
                self.state = VerificationState::CodeSent;
                self.condition = Some(VerificationCondition::CodeMismatch);
                None
            }
            Err(e) => {
                error!("Code confirmation failed: {}", e);
                self.state = VerificationState::Failed;
                self.condition = Some(VerificationCondition::ConfirmationFailed(e));
                None
            }
        }
    }

    /// Route a worker message to the matching completion handler.
    pub fn on_message(&mut self, message: VerificationMessage) -> Option<SubmissionSignal> {
        match message {
            VerificationMessage::Delivered { generation, result } => {
                self.on_delivery_result(generation, result);
                None
            }
            VerificationMessage::Confirmed { generation, result } => {
                self.on_confirmation_result(generation, result)
            }
        }
    }

    fn take_submission(&mut self) -> Option<SubmissionSignal> {
        if self.state != VerificationState::Verified || self.submission_fired {
            return None;
        }
        if !self.is_complete() {
            debug!("Verified but form incomplete, waiting for explicit submit");
            return None;
        }
        self.submission_fired = true;
        info!("Submitting quote request");
        Some(SubmissionSignal {
            contact: self.info.clone(),
        })
    }

    /// Explicit submit action on the contact step.
    ///
    /// Verified forms submit directly; unverified forms start verification.
    pub fn submit(&mut self) -> Result<SubmitOutcome, VerificationError> {
        if !is_valid_mobile(&self.info.mobile) {
            let err = InvalidMobileError {
                mobile: self.info.mobile.clone(),
            };
            self.mobile_error = Some(err.clone());
            return Err(err.into());
        }

        if self.is_verified() {
            if self.submission_fired {
                return Err(VerificationError::AlreadySubmitted);
            }
            return Ok(match self.take_submission() {
                Some(signal) => SubmitOutcome::Submitted(signal),
                None => SubmitOutcome::Incomplete,
            });
        }

        let mobile = self.info.mobile.clone();
        self.request_code(&mobile).map(SubmitOutcome::CodeRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFormValidator {
        let mut form = ContactFormValidator::default();
        form.set_name("Asha");
        form.set_address("Palm Residency");
        form.set_mobile("9876543210");
        form
    }

    #[test]
    fn test_email_predicate() {
        assert!(is_valid_email(""));
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.in"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b@c.de"));
    }

    #[test]
    fn test_mobile_predicate() {
        assert!(is_valid_mobile("9123456789"));
        assert!(is_valid_mobile("6000000000"));
        assert!(!is_valid_mobile("5123456789"));
        assert!(!is_valid_mobile("912345678"));
        assert!(!is_valid_mobile("91234567890"));
        assert!(!is_valid_mobile("91234S6789"));
        assert!(!is_valid_mobile(""));
    }

    #[test]
    fn test_form_completeness_ignores_email() {
        let mut info = ContactInfo {
            name: "Asha".into(),
            mobile: "9876543210".into(),
            address: "Palm Residency".into(),
            ..ContactInfo::default()
        };
        assert!(is_form_complete(&info));
        info.address = "  ".into();
        assert!(!is_form_complete(&info));
    }

    #[test]
    fn test_request_code_rejects_bad_mobile() {
        let mut form = ContactFormValidator::default();
        let err = form.request_code("5123456789").unwrap_err();
        assert!(matches!(err, VerificationError::InvalidMobile(_)));
        assert_eq!(form.state(), VerificationState::Unstarted);
        assert!(form.mobile_error().is_some());

        form.set_mobile("9");
        assert!(form.mobile_error().is_none());
    }

    #[test]
    fn test_delivery_failure_still_reaches_code_sent() {
        let mut form = filled();
        let req = form.request_code("9876543210").unwrap();
        assert_eq!(form.state(), VerificationState::CodeSent);
        assert!(form.on_delivery_result(
            req.generation,
            Err(DeliveryError::Unavailable("down".into()))
        ));
        assert_eq!(form.state(), VerificationState::CodeSent);
        assert!(form.is_degraded());
    }

    #[test]
    fn test_mismatch_clears_code_and_stays() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        let req = form.submit_code("000000").unwrap();
        assert!(form.on_confirmation_result(req.generation, Ok(false)).is_none());
        assert_eq!(form.state(), VerificationState::CodeSent);
        assert_eq!(form.condition(), Some(&VerificationCondition::CodeMismatch));
        assert_eq!(form.entered_code(), "");
    }

    #[test]
    fn test_confirmation_error_enters_failed_and_retry_allowed() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        let req = form.submit_code("123456").unwrap();
        form.on_confirmation_result(
            req.generation,
            Err(ConfirmationError::Unavailable("timeout".into())),
        );
        assert_eq!(form.state(), VerificationState::Failed);

        let retry = form.submit_code("123456").unwrap();
        assert_eq!(form.state(), VerificationState::CodeSent);
        assert!(form.on_confirmation_result(retry.generation, Ok(true)).is_some());
        assert!(form.is_verified());
    }

    #[test]
    fn test_malformed_retry_keeps_failed_state() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        let req = form.submit_code("123456").unwrap();
        form.on_confirmation_result(
            req.generation,
            Err(ConfirmationError::Backend("500".into())),
        );

        assert_eq!(
            form.submit_code("12a"),
            Err(VerificationError::IncompleteCode { expected: 6 })
        );
        assert_eq!(form.state(), VerificationState::Failed);
        assert!(matches!(
            form.condition(),
            Some(VerificationCondition::ConfirmationFailed(_))
        ));
    }

    #[test]
    fn test_submission_fires_once() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        let req = form.submit_code("123456").unwrap();
        assert!(form.on_confirmation_result(req.generation, Ok(true)).is_some());
        // Replayed completion is stale now
        assert!(form.on_confirmation_result(req.generation, Ok(true)).is_none());
        assert_eq!(form.submit(), Err(VerificationError::AlreadySubmitted));
    }

    #[test]
    fn test_stale_response_ignored_after_resend() {
        let mut form = filled();
        let first = form.request_code("9876543210").unwrap();
        let second = form.resend_code().unwrap();
        assert!(second.generation > first.generation);
        assert!(!form.on_delivery_result(
            first.generation,
            Err(DeliveryError::Unavailable("late".into()))
        ));
        assert!(!form.is_degraded());
        assert!(form.on_delivery_result(second.generation, Ok(())));
    }

    #[test]
    fn test_close_prompt_discards_late_response() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        let req = form.submit_code("123456").unwrap();
        form.close_prompt();
        assert!(form.on_confirmation_result(req.generation, Ok(true)).is_none());
        assert_eq!(form.state(), VerificationState::CodeSent);
        assert!(form.reopen_prompt());
    }

    #[test]
    fn test_resend_requires_started_flow() {
        let mut form = filled();
        assert_eq!(form.resend_code(), Err(VerificationError::NotStarted));
    }

    #[test]
    fn test_submit_code_checks_state_and_length() {
        let mut form = filled();
        assert!(matches!(
            form.submit_code("123456"),
            Err(VerificationError::NotAwaitingCode { .. })
        ));
        form.request_code("9876543210").unwrap();
        assert_eq!(
            form.submit_code("123"),
            Err(VerificationError::IncompleteCode { expected: 6 })
        );
    }

    #[test]
    fn test_verified_with_incomplete_form_waits_for_submit() {
        let mut form = ContactFormValidator::default();
        form.request_code("9876543210").unwrap();
        let req = form.submit_code("123456").unwrap();
        assert!(form.on_confirmation_result(req.generation, Ok(true)).is_none());
        assert!(form.is_verified());
        assert_eq!(form.submit(), Ok(SubmitOutcome::Incomplete));

        form.set_name("Ravi");
        form.set_address("Sea View");
        assert!(matches!(form.submit(), Ok(SubmitOutcome::Submitted(_))));
    }

    #[test]
    fn test_changing_mobile_resets_verification() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        form.set_mobile("9123456789");
        assert_eq!(form.state(), VerificationState::Unstarted);
        assert!(!form.is_waiting());
    }

    #[test]
    fn test_code_digit_entry() {
        let mut form = filled();
        form.request_code("9876543210").unwrap();
        for c in "12a34567".chars() {
            form.push_code_digit(c);
        }
        assert_eq!(form.entered_code(), "123456");
        form.pop_code_digit();
        assert_eq!(form.entered_code(), "12345");
    }
}
