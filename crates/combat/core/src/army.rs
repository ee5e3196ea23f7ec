//! Army value objects and the closed troop enumerations.

use strum::IntoEnumIterator;

use crate::error::{EngineError, ErrorSeverity};

/// Troop category of a formation.
///
/// The discriminants are the on-chain troop type codes. New variants are a
/// schema change, so every match over this enum is exhaustive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum TroopType {
    Knight = 0,
    Paladin = 1,
    Crossbowman = 2,
}

impl TryFrom<u8> for TroopType {
    type Error = ArmyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Knight),
            1 => Ok(Self::Paladin),
            2 => Ok(Self::Crossbowman),
            other => Err(ArmyError::UnknownTroopType(other)),
        }
    }
}

/// Troop power level. Higher tiers are strictly stronger.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum TroopTier {
    T1,
    T2,
    T3,
}

impl TroopTier {
    /// Tier number as shown to players (1, 2 or 3).
    pub const fn number(self) -> u8 {
        match self {
            Self::T1 => 1,
            Self::T2 => 2,
            Self::T3 => 3,
        }
    }
}

impl TryFrom<u8> for TroopTier {
    type Error = ArmyError;

    /// Accepts tier numbers 1..=3.
    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|tier| tier.number() == number)
            .ok_or(ArmyError::UnknownTier(number))
    }
}

/// One side of an exchange.
///
/// Counts are unsigned, so negative troops or stamina cannot be expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Army {
    pub stamina: u64,
    pub troop_count: u64,
    pub troop_type: TroopType,
    pub tier: TroopTier,
}

impl Army {
    pub const fn new(troop_type: TroopType, tier: TroopTier, troop_count: u64, stamina: u64) -> Self {
        Self {
            stamina,
            troop_count,
            troop_type,
            tier,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.troop_count == 0
    }

    /// Same formation with a different head count.
    #[must_use]
    pub const fn with_troop_count(mut self, troop_count: u64) -> Self {
        self.troop_count = troop_count;
        self
    }

    #[must_use]
    pub const fn with_stamina(mut self, stamina: u64) -> Self {
        self.stamina = stamina;
        self
    }
}

/// Raw codes that fall outside the closed enumerations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmyError {
    #[error("unknown troop type code {0}")]
    UnknownTroopType(u8),

    #[error("unknown troop tier {0} (expected 1, 2 or 3)")]
    UnknownTier(u8),

    #[error("unknown biome id {0}")]
    UnknownBiome(u8),
}

impl EngineError for ArmyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTroopType(_) => "ARMY_UNKNOWN_TROOP_TYPE",
            Self::UnknownTier(_) => "ARMY_UNKNOWN_TIER",
            Self::UnknownBiome(_) => "ARMY_UNKNOWN_BIOME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn troop_type_codes_round_trip() {
        for troop_type in TroopType::iter() {
            assert_eq!(TroopType::try_from(troop_type as u8), Ok(troop_type));
        }
        assert_eq!(TroopType::try_from(3), Err(ArmyError::UnknownTroopType(3)));
    }

    #[test]
    fn tiers_are_ordered_and_numbered_from_one() {
        assert!(TroopTier::T1 < TroopTier::T2 && TroopTier::T2 < TroopTier::T3);
        assert_eq!(TroopTier::try_from(2), Ok(TroopTier::T2));
        assert_eq!(TroopTier::try_from(0), Err(ArmyError::UnknownTier(0)));
        assert_eq!(TroopTier::T3.number(), 3);
        assert_eq!(TroopTier::try_from(4), Err(ArmyError::UnknownTier(4)));
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Crossbowman".parse(), Ok(TroopType::Crossbowman));
        assert_eq!("t2".parse(), Ok(TroopTier::T2));
        assert_eq!(TroopType::Paladin.to_string(), "paladin");
    }

    #[test]
    fn builders_replace_single_fields() {
        let army = Army::new(TroopType::Knight, TroopTier::T1, 10, 40);
        assert_eq!(army.with_troop_count(0).troop_count, 0);
        assert!(army.with_troop_count(0).is_empty());
        assert_eq!(army.with_stamina(5).stamina, 5);
        assert_eq!(army.with_stamina(5).troop_count, 10);
    }
}
