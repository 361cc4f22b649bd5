//! Error handling module for the quote wizard
//!
//! `QuoteWizardError` is what the library surface outside the step logic
//! returns: the headless answers run and the interactive loop. Step-level
//! errors (`WizardTransitionError`, `VerificationError`) keep their own types
//! and are wrapped unchanged.

use crate::contact::VerificationError;
use crate::wizard_state::{ContactStepError, WizardTransitionError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the quote wizard
#[derive(Error, Debug)]
pub enum QuoteWizardError {
    /// IO errors from the terminal backend
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be read
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON for its type
    #[error("Failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wizard step transition errors
    #[error(transparent)]
    Transition(#[from] WizardTransitionError),

    /// One-time code verification errors
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Required contact fields are missing
    #[error("Contact details are incomplete (name, mobile and address are required)")]
    IncompleteContact,

    /// The headless run reached the code prompt without a code to enter
    #[error("Answers file has no verification code")]
    MissingCode,

    /// The entered code was not accepted
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for quote wizard operations
pub type Result<T> = std::result::Result<T, QuoteWizardError>;

impl From<ContactStepError> for QuoteWizardError {
    fn from(err: ContactStepError) -> Self {
        match err {
            ContactStepError::Transition(e) => Self::Transition(e),
            ContactStepError::Verification(e) => Self::Verification(e),
        }
    }
}

impl QuoteWizardError {
    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
