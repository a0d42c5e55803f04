//! Enumeration and bounded small-integer types for the Dexstats dashboard.
//!
//! The scanner stores teams and gym slot counts as bare integers. These
//! types give them an explicit closed range so the rest of the workspace
//! never has to guess what a `3` or a `7` means.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// A gym-controlling team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// Uncontrolled gym.
    Neutral,
    /// Blue team.
    Mystic,
    /// Red team.
    Valor,
    /// Yellow team.
    Instinct,
}

impl Team {
    /// All teams in scanner id order.
    pub const ALL: [Self; 4] = [Self::Neutral, Self::Mystic, Self::Valor, Self::Instinct];

    /// Resolve a scanner `team_id` column value.
    ///
    /// Returns `None` for ids outside `0..=3`.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Neutral),
            1 => Some(Self::Mystic),
            2 => Some(Self::Valor),
            3 => Some(Self::Instinct),
            _ => None,
        }
    }

    /// The scanner id of this team.
    pub const fn id(self) -> u8 {
        match self {
            Self::Neutral => 0,
            Self::Mystic => 1,
            Self::Valor => 2,
            Self::Instinct => 3,
        }
    }

    /// English display name, used when the locale has no `team_<id>` entry.
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Mystic => "Mystic",
            Self::Valor => "Valor",
            Self::Instinct => "Instinct",
        }
    }
}

// ---------------------------------------------------------------------------
// Gym slots
// ---------------------------------------------------------------------------

/// Number of open defender slots in a gym, always within `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GymSlots(u8);

impl GymSlots {
    /// Fixed defender capacity of every gym.
    pub const MAX: u8 = 6;

    /// A gym with no open slots.
    pub const FULL: Self = Self(0);

    /// Build a slot count, rejecting values above [`GymSlots::MAX`].
    pub const fn new(available: u8) -> Option<Self> {
        if available <= Self::MAX {
            Some(Self(available))
        } else {
            None
        }
    }

    /// Build a slot count from an untrusted upstream value, clamping it
    /// into `0..=6`.
    pub fn clamped(raw: i64) -> Self {
        let bounded = raw.clamp(0, i64::from(Self::MAX));
        Self(u8::try_from(bounded).unwrap_or(Self::MAX))
    }

    /// The number of open slots.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// True when no defender slot is open.
    pub const fn is_full(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for GymSlots {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("gym slots {value} exceed {}", Self::MAX))
    }
}

impl From<GymSlots> for u8 {
    fn from(slots: GymSlots) -> Self {
        slots.0
    }
}

// ---------------------------------------------------------------------------
// Leaderboards and rewards
// ---------------------------------------------------------------------------

/// Time window of a catch-count leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatWindow {
    /// Every day the scanner has recorded.
    Lifetime,
    /// The current calendar day only.
    Today,
}

/// Category of an active quest reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// A pokemon encounter.
    Pokemon,
    /// An item stack.
    Item,
    /// Stardust.
    Stardust,
    /// Species candy.
    Candy,
    /// Anything the dashboard does not break out separately.
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_ids_round_trip() {
        for team in Team::ALL {
            assert_eq!(Team::from_id(team.id()), Some(team));
        }
        assert_eq!(Team::from_id(4), None);
    }

    #[test]
    fn gym_slots_reject_values_above_capacity() {
        assert!(GymSlots::new(6).is_some());
        assert!(GymSlots::new(7).is_none());
    }

    #[test]
    fn gym_slots_clamp_untrusted_values() {
        assert_eq!(GymSlots::clamped(-3), GymSlots::FULL);
        assert_eq!(GymSlots::clamped(9).get(), 6);
        assert_eq!(GymSlots::clamped(4).get(), 4);
    }

    #[test]
    fn gym_slots_deserialize_is_range_checked() {
        let ok: Result<GymSlots, _> = serde_json::from_str("2");
        assert_eq!(ok.ok().map(GymSlots::get), Some(2));
        let bad: Result<GymSlots, _> = serde_json::from_str("12");
        assert!(bad.is_err());
    }
}
