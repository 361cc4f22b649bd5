//! Room-count limits per apartment type
//!
//! Every room shares the same bounds for a given BHK type. The size qualifier
//! does not influence limits.

use crate::types::BhkType;
use serde::Serialize;
use std::fmt;

/// Inclusive room-count range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomLimits {
    pub min: u8,
    pub max: u8,
}

impl RoomLimits {
    /// Clamp a requested count into `[min, max]`.
    #[inline]
    pub fn clamp(self, count: i32) -> u8 {
        // min/max are u8 so the clamped value always fits
        count.clamp(i32::from(self.min), i32::from(self.max)) as u8
    }

    #[inline]
    pub fn contains(self, count: u8) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for RoomLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Limits used before any configuration has been chosen
pub const UNSET_LIMITS: RoomLimits = RoomLimits { min: 0, max: 3 };

/// Look up the allowed room-count range for a BHK type.
///
/// Total over the enumeration; `None` (no configuration chosen yet) falls back
/// to [`UNSET_LIMITS`].
pub const fn limits_for(bhk: Option<BhkType>) -> RoomLimits {
    match bhk {
        None => UNSET_LIMITS,
        Some(BhkType::OneBhk) => RoomLimits { min: 0, max: 1 },
        Some(BhkType::TwoBhk) => RoomLimits { min: 0, max: 2 },
        Some(BhkType::ThreeBhk) => RoomLimits { min: 0, max: 3 },
        Some(BhkType::FourBhk) => RoomLimits { min: 0, max: 4 },
        Some(BhkType::FivePlusBhk) => RoomLimits { min: 0, max: 10 },
    }
}

/// The full limit table as `(label, limits)` rows, unset row first
pub fn limit_table() -> Vec<(String, RoomLimits)> {
    let mut rows = vec![("unset".to_string(), limits_for(None))];
    rows.extend(
        BhkType::all()
            .into_iter()
            .map(|bhk| (bhk.to_string(), limits_for(Some(bhk)))),
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_table_values() {
        assert_eq!(limits_for(None), RoomLimits { min: 0, max: 3 });
        assert_eq!(limits_for(Some(BhkType::OneBhk)).max, 1);
        assert_eq!(limits_for(Some(BhkType::TwoBhk)).max, 2);
        assert_eq!(limits_for(Some(BhkType::ThreeBhk)).max, 3);
        assert_eq!(limits_for(Some(BhkType::FourBhk)).max, 4);
        assert_eq!(limits_for(Some(BhkType::FivePlusBhk)).max, 10);
    }

    #[test]
    fn test_min_never_exceeds_max() {
        for (label, limits) in limit_table() {
            assert!(limits.min <= limits.max, "{} has inverted limits", label);
        }
    }

    #[test]
    fn test_clamp() {
        let limits = limits_for(Some(BhkType::TwoBhk));
        assert_eq!(limits.clamp(-1), 0);
        assert_eq!(limits.clamp(1), 1);
        assert_eq!(limits.clamp(3), 2);
    }

    #[test]
    fn test_table_has_unset_row_first() {
        let table = limit_table();
        assert_eq!(table.len(), 6);
        assert_eq!(table[0].0, "unset");
        assert_eq!(table[5].0, "5 BHK+");
    }
}
