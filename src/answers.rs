//! Headless answers file
//!
//! Drives the wizard end to end without a terminal: every step goes through
//! the same `WizardController` operations the interactive screens use.

use crate::contact::ContactInfo;
use crate::error::{QuoteWizardError, Result};
use crate::types::{Configuration, PackageTier, Room};
use crate::verification::VerificationWorker;
use crate::wizard_state::{QuoteSnapshot, SubmitProgress, WizardController};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Pre-filled answers for every wizard step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub configuration: Configuration,
    /// Counts that differ from the configuration defaults
    #[serde(default)]
    pub rooms: BTreeMap<Room, i32>,
    /// Falls back to the first catalog package
    #[serde(default)]
    pub package: Option<PackageTier>,
    pub contact: ContactInfo,
    /// One-time code to enter after delivery
    #[serde(default)]
    pub code: Option<String>,
}

impl Answers {
    /// Load answers from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| QuoteWizardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| QuoteWizardError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Play the answers through `wizard`, verifying via `worker`.
    pub fn run(&self, wizard: &mut WizardController, worker: &VerificationWorker) -> Result<QuoteSnapshot> {
        wizard.set_configuration(self.configuration);
        wizard.advance()?;

        for (room, count) in &self.rooms {
            let applied = wizard.set_room_count(*room, *count);
            if i32::from(applied) != *count {
                warn!("{} count {} clamped to {}", room, count, applied);
            }
        }
        wizard.advance()?;

        if let Some(tier) = self.package {
            wizard.select_package(tier);
        }
        wizard.advance()?;

        wizard.fill_contact(self.contact.clone());
        if !wizard.contact().is_complete() {
            return Err(QuoteWizardError::IncompleteContact);
        }
        if let SubmitProgress::AwaitingCode(request) = wizard.submit()? {
            wizard.handle_verification(worker.run_blocking(&request))?;
            if let Some(condition) = wizard.contact().condition() {
                info!("{}", condition.message());
            }

            let code = self.code.as_deref().ok_or(QuoteWizardError::MissingCode)?;
            let confirm = wizard.submit_code(code)?;
            wizard.handle_verification(worker.run_blocking(&confirm))?;
        }

        if let Some(snapshot) = wizard.results() {
            return Ok(snapshot.clone());
        }
        let reason = match wizard.contact().condition() {
            Some(condition) => condition.message(),
            None => "no confirmation received",
        };
        Err(QuoteWizardError::VerificationFailed(reason.to_string()))
    }
}
