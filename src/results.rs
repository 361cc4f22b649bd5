//! Results hand-off
//!
//! The wizard ends with an immutable [`QuoteSnapshot`]. A [`ResultsSink`]
//! transmits or stores it; `estimate_summary` renders it for people.

use crate::package::package_info;
use crate::verification::mask_mobile;
use crate::wizard_state::QuoteSnapshot;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives the final snapshot
pub trait ResultsSink {
    fn deliver(&self, snapshot: &QuoteSnapshot) -> Result<()>;
}

/// Writes the snapshot as pretty JSON
#[derive(Debug, Clone)]
pub struct JsonResultsFile {
    path: PathBuf,
}

impl JsonResultsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a previously written snapshot back
    pub fn load(&self) -> Result<QuoteSnapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read results from {:?}", self.path))?;
        serde_json::from_str(&content).context("Failed to parse results JSON")
    }
}

impl ResultsSink for JsonResultsFile {
    fn deliver(&self, snapshot: &QuoteSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .context("Failed to serialize quote to JSON")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write results to {:?}", self.path))?;
        info!("Quote written to {}", self.path.display());
        Ok(())
    }
}

/// Human-readable lines describing a submitted quote
pub fn estimate_summary(snapshot: &QuoteSnapshot) -> Vec<String> {
    let pkg = package_info(snapshot.package);
    let mut lines = vec![
        format!("Configuration: {}", snapshot.configuration),
        format!("Package: {} ({})", pkg.name, pkg.price_band),
        "Rooms:".to_string(),
    ];
    lines.extend(
        snapshot
            .rooms
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(room, count)| format!("  {} x {}", room, count)),
    );

    let contact = &snapshot.contact;
    lines.push(format!("Name: {}", contact.name));
    lines.push(format!("Mobile: {} (verified)", mask_mobile(&contact.mobile)));
    if !contact.email.is_empty() {
        lines.push(format!("Email: {}", contact.email));
    }
    lines.push(format!("Property: {}", contact.address));
    lines.push(format!(
        "WhatsApp updates: {}",
        if contact.whatsapp_opt_in { "yes" } else { "no" }
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactInfo;
    use crate::rooms::RoomCountStore;
    use crate::types::{BhkType, PackageTier};

    fn snapshot() -> QuoteSnapshot {
        let mut rooms = RoomCountStore::new();
        rooms.set_configuration(Some(BhkType::OneBhk));
        rooms.decrement(crate::types::Room::Dining);
        QuoteSnapshot {
            configuration: "1 BHK".parse().unwrap(),
            rooms: rooms.counts().clone(),
            package: PackageTier::Luxury,
            contact: ContactInfo {
                name: "Asha".into(),
                mobile: "9876543210".into(),
                address: "Palm Residency".into(),
                ..ContactInfo::default()
            },
        }
    }

    #[test]
    fn test_summary_lists_only_chosen_rooms() {
        let lines = estimate_summary(&snapshot());
        assert!(lines.contains(&"Configuration: 1 BHK".to_string()));
        assert!(lines.contains(&"Package: Luxury Lux (₹₹₹)".to_string()));
        assert!(lines.contains(&"  Bedroom x 1".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Dining")));
        assert!(lines.contains(&"Mobile: ******3210 (verified)".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Email")));
    }

    #[test]
    fn test_json_results_file_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonResultsFile::new(dir.path().join("quote.json"));
        let snap = snapshot();
        sink.deliver(&snap).unwrap();
        assert_eq!(sink.load().unwrap(), snap);
    }
}
