//! Type-safe wizard values
//!
//! Apartment configurations, rooms and package tiers are proper enums rather
//! than display strings, so an invalid BHK/size pairing cannot be expressed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// Apartment type by bedroom count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum BhkType {
    #[strum(to_string = "1 BHK")]
    #[serde(rename = "1 BHK")]
    OneBhk,
    #[strum(to_string = "2 BHK")]
    #[serde(rename = "2 BHK")]
    TwoBhk,
    #[strum(to_string = "3 BHK")]
    #[serde(rename = "3 BHK")]
    ThreeBhk,
    #[strum(to_string = "4 BHK")]
    #[serde(rename = "4 BHK")]
    FourBhk,
    #[strum(to_string = "5 BHK+")]
    #[serde(rename = "5 BHK+")]
    FivePlusBhk,
}

impl BhkType {
    /// Numeric bedroom count this type stands for (5 for "5 BHK+")
    pub const fn bedrooms(self) -> u8 {
        match self {
            Self::OneBhk => 1,
            Self::TwoBhk => 2,
            Self::ThreeBhk => 3,
            Self::FourBhk => 4,
            Self::FivePlusBhk => 5,
        }
    }

    /// Mid-sized apartments are further split into small and large layouts
    pub const fn requires_qualifier(self) -> bool {
        matches!(self, Self::TwoBhk | Self::ThreeBhk | Self::FourBhk)
    }

    /// All types in display order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Size sub-choice for 2/3/4 BHK apartments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SizeQualifier {
    Small,
    Large,
}

impl SizeQualifier {
    /// All qualifiers in display order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Errors building or parsing a [`Configuration`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{bhk} requires a size (Small or Large)")]
    MissingQualifier { bhk: BhkType },

    #[error("{bhk} does not take a size qualifier")]
    UnexpectedQualifier { bhk: BhkType },

    #[error("Unrecognized configuration: {0:?}")]
    Unrecognized(String),
}

/// A complete apartment configuration.
///
/// # Invariants
///
/// - `qualifier` is `Some` if and only if `bhk.requires_qualifier()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Configuration {
    bhk: BhkType,
    qualifier: Option<SizeQualifier>,
}

impl Configuration {
    /// Separator between the BHK type and the size in the display form
    pub const SEPARATOR: &'static str = " - ";

    /// Build a configuration, rejecting invalid BHK/qualifier pairs.
    pub fn new(
        bhk: BhkType,
        qualifier: Option<SizeQualifier>,
    ) -> Result<Self, ConfigurationError> {
        match (bhk.requires_qualifier(), qualifier) {
            (true, None) => Err(ConfigurationError::MissingQualifier { bhk }),
            (false, Some(_)) => Err(ConfigurationError::UnexpectedQualifier { bhk }),
            _ => Ok(Self { bhk, qualifier }),
        }
    }

    #[inline]
    pub fn bhk(&self) -> BhkType {
        self.bhk
    }

    #[inline]
    pub fn qualifier(&self) -> Option<SizeQualifier> {
        self.qualifier
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier {
            Some(q) => write!(f, "{}{}{}", self.bhk, Self::SEPARATOR, q),
            None => write!(f, "{}", self.bhk),
        }
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (bhk_part, qualifier_part) = match s.split_once(Self::SEPARATOR.trim()) {
            Some((b, q)) => (b.trim(), Some(q.trim())),
            None => (s, None),
        };

        let bhk = BhkType::from_str(bhk_part)
            .map_err(|_| ConfigurationError::Unrecognized(s.to_string()))?;
        let qualifier = qualifier_part
            .map(|q| {
                SizeQualifier::from_str(q)
                    .map_err(|_| ConfigurationError::Unrecognized(s.to_string()))
            })
            .transpose()?;

        Self::new(bhk, qualifier)
    }
}

impl TryFrom<String> for Configuration {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Configuration> for String {
    fn from(value: Configuration) -> Self {
        value.to_string()
    }
}

/// Rooms offered for design, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Room {
    #[strum(to_string = "Living Room", serialize = "living", serialize = "LivingRoom")]
    LivingRoom,
    Bedroom,
    Kitchen,
    Dining,
    Bathroom,
}

impl Room {
    /// All rooms in display order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Service tier offered at the package step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum PackageTier {
    #[strum(to_string = "Basic Blends", serialize = "basic")]
    Basic,
    #[strum(to_string = "Luxury Lux", serialize = "luxury")]
    Luxury,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bhk_display_matches_labels() {
        let labels: Vec<String> = BhkType::all().iter().map(|b| b.to_string()).collect();
        assert_eq!(labels, vec!["1 BHK", "2 BHK", "3 BHK", "4 BHK", "5 BHK+"]);
    }

    #[test]
    fn test_qualifier_required_only_for_mid_sizes() {
        assert!(!BhkType::OneBhk.requires_qualifier());
        assert!(BhkType::TwoBhk.requires_qualifier());
        assert!(BhkType::ThreeBhk.requires_qualifier());
        assert!(BhkType::FourBhk.requires_qualifier());
        assert!(!BhkType::FivePlusBhk.requires_qualifier());
    }

    #[test]
    fn test_configuration_rejects_invalid_pairs() {
        assert_eq!(
            Configuration::new(BhkType::ThreeBhk, None),
            Err(ConfigurationError::MissingQualifier { bhk: BhkType::ThreeBhk })
        );
        assert_eq!(
            Configuration::new(BhkType::OneBhk, Some(SizeQualifier::Large)),
            Err(ConfigurationError::UnexpectedQualifier { bhk: BhkType::OneBhk })
        );
    }

    #[test]
    fn test_configuration_display() {
        let c = Configuration::new(BhkType::ThreeBhk, Some(SizeQualifier::Small)).unwrap();
        assert_eq!(c.to_string(), "3 BHK - Small");

        let c = Configuration::new(BhkType::FivePlusBhk, None).unwrap();
        assert_eq!(c.to_string(), "5 BHK+");
    }

    #[test]
    fn test_configuration_parse() {
        let c: Configuration = "4 BHK - Large".parse().unwrap();
        assert_eq!(c.bhk(), BhkType::FourBhk);
        assert_eq!(c.qualifier(), Some(SizeQualifier::Large));

        let c: Configuration = "1 BHK".parse().unwrap();
        assert_eq!(c.qualifier(), None);

        assert!(matches!(
            "4 BHK".parse::<Configuration>(),
            Err(ConfigurationError::MissingQualifier { .. })
        ));
        assert!(matches!(
            "penthouse".parse::<Configuration>(),
            Err(ConfigurationError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_configuration_serde_uses_display_form() {
        let c = Configuration::new(BhkType::TwoBhk, Some(SizeQualifier::Large)).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"2 BHK - Large\"");
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Configuration>("\"2 BHK\"").is_err());
    }

    #[test]
    fn test_room_order_and_labels() {
        let labels: Vec<String> = Room::all().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            labels,
            vec!["Living Room", "Bedroom", "Kitchen", "Dining", "Bathroom"]
        );
        assert_eq!("living".parse::<Room>().unwrap(), Room::LivingRoom);
        assert_eq!("bathroom".parse::<Room>().unwrap(), Room::Bathroom);
    }

    #[test]
    fn test_package_tier_parse_aliases() {
        assert_eq!("basic".parse::<PackageTier>().unwrap(), PackageTier::Basic);
        assert_eq!("Luxury Lux".parse::<PackageTier>().unwrap(), PackageTier::Luxury);
        assert_eq!(PackageTier::Basic.to_string(), "Basic Blends");
    }
}
