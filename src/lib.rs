//! Quote Wizard Library
//!
//! A four-step interior-design quote wizard: BHK configuration, room counts,
//! package tier and a contact form gated on one-time-code mobile
//! verification. The step logic is terminal-independent; `app` and `ui`
//! put a ratatui front end on it and `answers` drives it headlessly.

pub mod answers;
pub mod app;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod configuration;
pub mod contact;
pub mod error;
pub mod package;
pub mod results;
pub mod room_limits;
pub mod rooms;
pub mod theme;
pub mod types;
pub mod ui;
pub mod verification;
pub mod wizard_state;

// Re-export main types for convenience
pub use answers::Answers;
pub use config_file::{AppConfig, VerificationBackend};
pub use configuration::ConfigurationSelector;
pub use contact::{
    ContactFormValidator, ContactInfo, SubmissionSignal, VerificationCondition, VerificationError,
    VerificationState, is_form_complete, is_valid_email, is_valid_mobile,
};
pub use error::QuoteWizardError;
pub use package::{CATALOG, PackageInfo, PackageSelector};
pub use results::{JsonResultsFile, ResultsSink, estimate_summary};
pub use room_limits::{RoomLimits, limit_table, limits_for};
pub use rooms::{RoomCountStore, RoomCounts};
pub use types::{BhkType, Configuration, ConfigurationError, PackageTier, Room, SizeQualifier};
pub use verification::{
    CodeConfirmation, CodeDelivery, ConfirmationError, DeliveryError, DemoVerifier,
    OfflineDelivery, VerificationMessage, VerificationRequest, VerificationWorker,
};
pub use wizard_state::{
    ContactStepError, QuoteSnapshot, Step, SubmitProgress, WizardController, WizardTransitionError,
};
