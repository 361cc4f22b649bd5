//! Apartment configuration selection
//!
//! Picking a 2/3/4 BHK opens a size sub-choice; the selection is only complete
//! once that size has been chosen. 1 BHK and 5 BHK+ are complete immediately.

use crate::types::{BhkType, Configuration, SizeQualifier};
use tracing::debug;

/// Tracks the chosen BHK type and its optional size qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationSelector {
    bhk: Option<BhkType>,
    qualifier: Option<SizeQualifier>,
}

impl ConfigurationSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a base BHK type.
    ///
    /// Always clears a previously chosen qualifier, even when re-selecting the
    /// same type.
    pub fn select(&mut self, bhk: BhkType) {
        debug!("Configuration selected: {} (qualifier cleared)", bhk);
        self.bhk = Some(bhk);
        self.qualifier = None;
    }

    /// Choose the size for the current BHK type.
    ///
    /// Ignored when no type is selected or the type takes no qualifier.
    /// Returns whether the qualifier was applied.
    pub fn select_size_qualifier(&mut self, qualifier: SizeQualifier) -> bool {
        match self.bhk {
            Some(bhk) if bhk.requires_qualifier() => {
                debug!("Size qualifier selected: {} - {}", bhk, qualifier);
                self.qualifier = Some(qualifier);
                true
            }
            other => {
                debug!("Ignoring size qualifier {} for {:?}", qualifier, other);
                false
            }
        }
    }

    #[inline]
    pub fn bhk(&self) -> Option<BhkType> {
        self.bhk
    }

    #[inline]
    pub fn qualifier(&self) -> Option<SizeQualifier> {
        self.qualifier
    }

    /// True while the size sub-choice is open and unanswered
    pub fn awaiting_qualifier(&self) -> bool {
        self.bhk.is_some_and(BhkType::requires_qualifier) && self.qualifier.is_none()
    }

    /// The composite value, if complete.
    pub fn value(&self) -> Option<Configuration> {
        Configuration::new(self.bhk?, self.qualifier).ok()
    }

    /// Completeness predicate gating the first wizard step
    pub fn is_complete(&self) -> bool {
        self.value().is_some()
    }

    /// Restore a full configuration at once (headless answers).
    pub fn set(&mut self, configuration: Configuration) {
        self.bhk = Some(configuration.bhk());
        self.qualifier = configuration.qualifier();
    }
}
