//! Package tier catalog and selection

use crate::types::PackageTier;
use serde::Serialize;
use tracing::debug;

/// Display metadata for a package tier
#[derive(Debug, Clone, Serialize)]
pub struct PackageInfo {
    pub tier: PackageTier,
    pub name: &'static str,
    pub price_band: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
}

/// The fixed, ordered package catalog. The first entry is the default.
pub const CATALOG: &[PackageInfo] = &[
    PackageInfo {
        tier: PackageTier::Basic,
        name: "Basic Blends",
        price_band: "₹",
        description: "A range of essential home interior solutions that's perfect for all your needs.",
        highlights: &["Affordable pricing", "Convenient designs", "Basic accessories"],
    },
    PackageInfo {
        tier: PackageTier::Luxury,
        name: "Luxury Lux",
        price_band: "₹₹₹",
        description: "Premium quality interior design with luxury finishes and bespoke solutions.",
        highlights: &["Premium materials", "Bespoke designs", "Luxury accessories"],
    },
];

/// Catalog entry for a tier
pub fn package_info(tier: PackageTier) -> &'static PackageInfo {
    CATALOG
        .iter()
        .find(|p| p.tier == tier)
        .unwrap_or(&CATALOG[0])
}

/// Tracks the chosen package tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSelector {
    selected: Option<PackageTier>,
}

impl PackageSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, tier: PackageTier) {
        debug!("Package selected: {}", tier);
        self.selected = Some(tier);
    }

    /// Select the first catalog package if nothing is chosen yet.
    ///
    /// Returns true when a default was applied. Never overrides an existing
    /// choice.
    pub fn ensure_default(&mut self) -> bool {
        if self.selected.is_some() {
            return false;
        }
        match CATALOG.first() {
            Some(first) => {
                debug!("Defaulting package to {}", first.tier);
                self.selected = Some(first.tier);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn selected(&self) -> Option<PackageTier> {
        self.selected
    }
}
