//! Property-Based Tests for the quote wizard
//!
//! Uses proptest for invariants and edge cases.
//!
//! These tests verify:
//! - Room limits are ordered and defaults lie inside them
//! - Counts never leave their limits under any sequence of adjustments
//! - Clamping is idempotent
//! - The mobile and email predicates

use proptest::prelude::*;
use quotewizard::contact::{is_valid_email, is_valid_mobile};
use quotewizard::room_limits::limits_for;
use quotewizard::rooms::RoomCountStore;
use quotewizard::types::{BhkType, Configuration, Room, SizeQualifier};

/// Strategy for an optional BHK type (None = nothing chosen yet)
fn bhk_strategy() -> impl Strategy<Value = Option<BhkType>> {
    prop_oneof![
        Just(None),
        Just(Some(BhkType::OneBhk)),
        Just(Some(BhkType::TwoBhk)),
        Just(Some(BhkType::ThreeBhk)),
        Just(Some(BhkType::FourBhk)),
        Just(Some(BhkType::FivePlusBhk)),
    ]
}

fn room_strategy() -> impl Strategy<Value = Room> {
    prop_oneof![
        Just(Room::LivingRoom),
        Just(Room::Bedroom),
        Just(Room::Kitchen),
        Just(Room::Dining),
        Just(Room::Bathroom),
    ]
}

/// One counter press or a direct set
#[derive(Debug, Clone)]
enum Adjustment {
    Increment(Room),
    Decrement(Room),
    Set(Room, i32),
}

fn adjustment_strategy() -> impl Strategy<Value = Adjustment> {
    prop_oneof![
        room_strategy().prop_map(Adjustment::Increment),
        room_strategy().prop_map(Adjustment::Decrement),
        (room_strategy(), -20i32..40).prop_map(|(room, n)| Adjustment::Set(room, n)),
    ]
}

// =============================================================================
// Room limits
// =============================================================================

proptest! {
    /// limits are ordered and defaults lie within them
    #[test]
    fn limits_ordered_and_defaults_in_range(bhk in bhk_strategy()) {
        let limits = limits_for(bhk);
        prop_assert!(limits.min <= limits.max);

        let mut store = RoomCountStore::new();
        store.set_configuration(bhk);
        for room in Room::all() {
            prop_assert!(limits.contains(store.count(room)));
        }
    }

    /// No sequence of adjustments escapes the limits
    #[test]
    fn counts_stay_within_limits(
        bhk in bhk_strategy(),
        steps in prop::collection::vec(adjustment_strategy(), 0..60),
    ) {
        let mut store = RoomCountStore::new();
        store.set_configuration(bhk);
        let limits = store.limits();

        for step in steps {
            let count = match step {
                Adjustment::Increment(room) => store.increment(room),
                Adjustment::Decrement(room) => store.decrement(room),
                Adjustment::Set(room, n) => store.set_count(room, n),
            };
            prop_assert!(limits.contains(count));
        }
        prop_assert_eq!(store.counts().len(), Room::all().len());
    }

    /// Clamping an already clamped value changes nothing
    #[test]
    fn clamp_is_idempotent(bhk in bhk_strategy(), n in any::<i32>()) {
        let limits = limits_for(bhk);
        let once = limits.clamp(n);
        prop_assert_eq!(limits.clamp(i32::from(once)), once);
    }

    /// Pressing at a bound leaves the count unchanged
    #[test]
    fn adjusting_at_bounds_is_a_no_op(bhk in bhk_strategy(), room in room_strategy()) {
        let mut store = RoomCountStore::new();
        store.set_configuration(bhk);
        let limits = store.limits();

        store.set_count(room, i32::from(limits.max));
        prop_assert_eq!(store.increment(room), limits.max);
        prop_assert!(!store.can_increment(room));

        store.set_count(room, i32::from(limits.min));
        prop_assert_eq!(store.decrement(room), limits.min);
        prop_assert!(!store.can_decrement(room));
    }
}

// =============================================================================
// Configuration
// =============================================================================

proptest! {
    /// Display then parse gives back the same composite
    #[test]
    fn configuration_text_round_trip(
        bhk in bhk_strategy().prop_filter("chosen", Option::is_some),
        large in any::<bool>(),
    ) {
        let bhk = bhk.unwrap_or(BhkType::OneBhk);
        let qualifier = bhk
            .requires_qualifier()
            .then_some(if large { SizeQualifier::Large } else { SizeQualifier::Small });
        let configuration = Configuration::new(bhk, qualifier).unwrap();
        let parsed: Configuration = configuration.to_string().parse().unwrap();
        prop_assert_eq!(parsed, configuration);
    }
}

// =============================================================================
// Contact predicates
// =============================================================================

proptest! {
    /// Any 10 digits starting 6-9 is a valid mobile
    #[test]
    fn mobile_accepts_well_formed(number in "[6-9][0-9]{9}") {
        prop_assert!(is_valid_mobile(&number));
    }

    /// Wrong leading digit is rejected
    #[test]
    fn mobile_rejects_bad_prefix(number in "[0-5][0-9]{9}") {
        prop_assert!(!is_valid_mobile(&number));
    }

    /// Wrong length is rejected
    #[test]
    fn mobile_rejects_wrong_length(number in "[6-9][0-9]{0,8}|[6-9][0-9]{10,14}") {
        prop_assert!(!is_valid_mobile(&number));
    }

    /// Simple local@domain.tld addresses pass
    #[test]
    fn email_accepts_simple_addresses(
        local in "[a-z][a-z0-9.]{0,10}",
        host in "[a-z]{1,10}",
        tld in "[a-z]{2,4}",
    ) {
        let email = format!("{}@{}.{}", local, host, tld);
        prop_assert!(is_valid_email(&email));
    }

    /// Without an @ nothing passes except the empty string
    #[test]
    fn email_requires_at_sign(s in "[a-z0-9.]{1,20}") {
        prop_assert!(!is_valid_email(&s));
    }
}
