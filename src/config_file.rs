//! Application configuration file handling.
//!
//! The config selects the verification backend and a few presentation
//! settings. It is stored as JSON and uses type-safe enums for choices.

use crate::verification::{CodeConfirmation, CodeDelivery, DemoVerifier, OfflineDelivery};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum::{Display, EnumString};

/// Which capability pair verifies mobile numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VerificationBackend {
    /// Nothing is sent; the configured demo code is accepted
    #[default]
    Demo,
    /// Delivery always fails; the demo code can still be entered manually
    Offline,
}

/// Verification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    pub backend: VerificationBackend,
    pub demo_code: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            backend: VerificationBackend::Demo,
            demo_code: "123456".to_string(),
        }
    }
}

/// Application configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix shown before the 10-digit mobile number
    pub country_code: String,
    /// Digits in a one-time code
    pub code_length: usize,
    pub verification: VerificationConfig,
    /// Where the submitted quote is written as JSON, if anywhere
    pub results_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            country_code: "+91".to_string(),
            code_length: crate::contact::DEFAULT_CODE_LENGTH,
            verification: VerificationConfig::default(),
            results_path: None,
        }
    }
}

impl AppConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults. Always validated.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let cc = self.country_code.trim();
        if !cc.starts_with('+') || cc.len() < 2 || !cc[1..].chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Country code must look like +91");
        }

        if !(4..=8).contains(&self.code_length) {
            anyhow::bail!("Code length must be between 4 and 8 digits");
        }

        let demo = &self.verification.demo_code;
        if !demo.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Demo code must contain only digits");
        }
        if demo.len() != self.code_length {
            anyhow::bail!(
                "Demo code must be {} digits long (got {})",
                self.code_length,
                demo.len()
            );
        }

        Ok(())
    }

    /// Build the delivery and confirmation capabilities for this config.
    pub fn capabilities(&self) -> (Arc<dyn CodeDelivery>, Arc<dyn CodeConfirmation>) {
        let demo = Arc::new(DemoVerifier::new(self.verification.demo_code.clone()));
        let delivery: Arc<dyn CodeDelivery> = match self.verification.backend {
            VerificationBackend::Demo => demo.clone(),
            VerificationBackend::Offline => Arc::new(OfflineDelivery),
        };
        let confirmation: Arc<dyn CodeConfirmation> = demo;
        (delivery, confirmation)
    }
}
