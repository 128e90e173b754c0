//! Subscription tier types

use serde::{Deserialize, Serialize};

/// Subscription tier levels, ordered `Free < Pro < Instructor`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Default tier for every registered user
    #[default]
    Free,
    /// Paid tier for individual members
    Pro,
    /// Paid tier for coaches with students
    Instructor,
}

impl Tier {
    /// All tiers in ascending order
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Instructor];

    /// Numeric rank used for access comparisons
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Pro => 1,
            Self::Instructor => 2,
        }
    }

    /// Canonical wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Pro => "PRO",
            Self::Instructor => "INSTRUCTOR",
        }
    }

    /// Human-readable name for upgrade prompts
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Instructor => "Instructor",
        }
    }

    /// Whether this tier meets a minimum tier requirement
    pub const fn satisfies(&self, required: Tier) -> bool {
        self.rank() >= required.rank()
    }

    /// Normalize an untrusted tier string.
    ///
    /// Session and storage layers hand tiers over as free-form strings.
    /// Only the exact wire names are recognized; anything else, including
    /// other spellings of a known tier, becomes [`Tier::Free`].
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Free)
    }

    /// Resolve the tier attached to a session, which may be absent
    pub fn from_session(raw: Option<&str>) -> Self {
        raw.map_or(Self::Free, Self::normalize)
    }

    /// Parse operator-supplied configuration, ignoring case and surrounding
    /// whitespace. Never use this for session data.
    pub fn parse_config(raw: &str) -> Result<Self, TierParseError> {
        raw.trim()
            .to_ascii_uppercase()
            .parse()
            .map_err(|_| TierParseError(raw.to_string()))
    }
}

/// Rank of a raw tier string; unknown strings rank as `Free` (0)
pub fn rank_of(raw: &str) -> u8 {
    Tier::normalize(raw).rank()
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FREE" => Ok(Self::Free),
            "PRO" => Ok(Self::Pro),
            "INSTRUCTOR" => Ok(Self::Instructor),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tier: {0}")]
pub struct TierParseError(pub String);
