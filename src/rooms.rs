//! Room counts clamped by the room-limit policy
//!
//! Out-of-range adjustments are absorbed silently: incrementing at the
//! maximum or decrementing at the minimum is a no-op. The UI disables the
//! control instead of surfacing an error.

use crate::room_limits::{RoomLimits, limits_for};
use crate::types::{BhkType, Room};
use std::collections::BTreeMap;
use tracing::debug;

/// Room name to count, in fixed display order
pub type RoomCounts = BTreeMap<Room, u8>;

/// Holds per-room counts for the current configuration.
///
/// # Invariants
///
/// - Every [`Room`] has an entry
/// - Every count lies within `limits_for(bhk)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCountStore {
    bhk: Option<BhkType>,
    counts: RoomCounts,
}

impl Default for RoomCountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCountStore {
    /// Store for an unset configuration: one of every room.
    pub fn new() -> Self {
        let mut store = Self {
            bhk: None,
            counts: RoomCounts::new(),
        };
        store.reset_defaults();
        store
    }

    /// Switch configuration and reset every count to its default.
    pub fn set_configuration(&mut self, bhk: Option<BhkType>) {
        self.bhk = bhk;
        self.reset_defaults();
        debug!("Room counts reset for {:?}: {:?}", bhk, self.counts);
    }

    fn reset_defaults(&mut self) {
        let limits = self.limits();
        for room in Room::all() {
            self.counts.insert(room, Self::default_count(self.bhk, room, limits));
        }
    }

    /// Default count: bedrooms and bathrooms follow the BHK number, others 1.
    fn default_count(bhk: Option<BhkType>, room: Room, limits: RoomLimits) -> u8 {
        let wanted = match (room, bhk) {
            (Room::Bedroom | Room::Bathroom, Some(bhk)) => bhk.bedrooms().min(limits.max),
            _ => 1,
        };
        limits.clamp(i32::from(wanted))
    }

    /// Current limits for every room
    #[inline]
    pub fn limits(&self) -> RoomLimits {
        limits_for(self.bhk)
    }

    pub fn count(&self, room: Room) -> u8 {
        self.counts.get(&room).copied().unwrap_or_default()
    }

    pub fn counts(&self) -> &RoomCounts {
        &self.counts
    }

    /// Add one, clamped at the maximum. Returns the resulting count.
    pub fn increment(&mut self, room: Room) -> u8 {
        self.adjust(room, 1)
    }

    /// Remove one, clamped at the minimum. Returns the resulting count.
    pub fn decrement(&mut self, room: Room) -> u8 {
        self.adjust(room, -1)
    }

    /// Set a count directly, clamped into range.
    pub fn set_count(&mut self, room: Room, count: i32) -> u8 {
        let clamped = self.limits().clamp(count);
        self.counts.insert(room, clamped);
        clamped
    }

    fn adjust(&mut self, room: Room, delta: i32) -> u8 {
        let current = self.count(room);
        let next = self.limits().clamp(i32::from(current) + delta);
        if next == current {
            debug!("{} count held at {} (limits {})", room, current, self.limits());
        }
        self.counts.insert(room, next);
        next
    }

    /// Whether the "+" control should be enabled
    pub fn can_increment(&self, room: Room) -> bool {
        self.count(room) < self.limits().max
    }

    /// Whether the "-" control should be enabled
    pub fn can_decrement(&self, room: Room) -> bool {
        self.count(room) > self.limits().min
    }
}
