//! Terrain bonus lookup.
//!
//! The engine asks an oracle for a damage multiplier per (troop type, biome)
//! pair and has no opinion about how the oracle decides. Relic identifiers
//! are forwarded untouched so an oracle can account for them.

use crate::army::{ArmyError, TroopType};

/// Battlefield biome, numbered by on-chain biome id.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Biome {
    #[default]
    None = 0,
    DeepOcean = 1,
    Ocean = 2,
    Beach = 3,
    Scorched = 4,
    Bare = 5,
    Tundra = 6,
    Snow = 7,
    TemperateDesert = 8,
    Shrubland = 9,
    Taiga = 10,
    Grassland = 11,
    TemperateDeciduousForest = 12,
    TemperateRainForest = 13,
    SubtropicalDesert = 14,
    TropicalSeasonalForest = 15,
    TropicalRainForest = 16,
}

impl TryFrom<u8> for Biome {
    type Error = ArmyError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        use Biome::*;
        Ok(match id {
            0 => None,
            1 => DeepOcean,
            2 => Ocean,
            3 => Beach,
            4 => Scorched,
            5 => Bare,
            6 => Tundra,
            7 => Snow,
            8 => TemperateDesert,
            9 => Shrubland,
            10 => Taiga,
            11 => Grassland,
            12 => TemperateDeciduousForest,
            13 => TemperateRainForest,
            14 => SubtropicalDesert,
            15 => TropicalSeasonalForest,
            16 => TropicalRainForest,
            other => return Err(ArmyError::UnknownBiome(other)),
        })
    }
}

/// Opaque relic/modifier identifier handed through to the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RelicId(pub u16);

/// Supplies the damage multiplier a troop type gets on a biome.
///
/// Implementations must be pure lookups: the simulators are shared across
/// threads and call the oracle from every battle.
pub trait TerrainBonusOracle: Send + Sync {
    fn bonus(&self, troop_type: TroopType, biome: Biome, relics: &[RelicId]) -> f64;
}

impl<F> TerrainBonusOracle for F
where
    F: Fn(TroopType, Biome, &[RelicId]) -> f64 + Send + Sync,
{
    fn bonus(&self, troop_type: TroopType, biome: Biome, relics: &[RelicId]) -> f64 {
        self(troop_type, biome, relics)
    }
}

/// Oracle that never modifies damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeutralTerrain;

impl TerrainBonusOracle for NeutralTerrain {
    fn bonus(&self, _troop_type: TroopType, _biome: Biome, _relics: &[RelicId]) -> f64 {
        1.0
    }
}

/// How a biome treats one troop type.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Affinity {
    Favored,
    #[default]
    Neutral,
    Hindered,
}

impl Affinity {
    const fn sign(self) -> f64 {
        match self {
            Self::Favored => 1.0,
            Self::Neutral => 0.0,
            Self::Hindered => -1.0,
        }
    }
}

/// Affinities for one biome, indexed by troop type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiomeRow {
    pub knight: Affinity,
    pub paladin: Affinity,
    pub crossbowman: Affinity,
}

impl BiomeRow {
    pub const fn new(knight: Affinity, paladin: Affinity, crossbowman: Affinity) -> Self {
        Self {
            knight,
            paladin,
            crossbowman,
        }
    }

    pub const fn affinity(&self, troop_type: TroopType) -> Affinity {
        match troop_type {
            TroopType::Knight => self.knight,
            TroopType::Paladin => self.paladin,
            TroopType::Crossbowman => self.crossbowman,
        }
    }
}

const BIOME_COUNT: usize = <Biome as strum::EnumCount>::COUNT;

/// Biome table: multiplier = `1 ± damage_biome_bonus_num / 10 000`.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeBonusTable {
    bonus: f64,
    rows: [BiomeRow; BIOME_COUNT],
}

impl BiomeBonusTable {
    /// All-neutral table with the given bonus magnitude (out of 10 000).
    pub fn new(bonus_num: u64) -> Self {
        Self {
            bonus: bonus_num as f64 / 10_000.0,
            rows: [BiomeRow::default(); BIOME_COUNT],
        }
    }

    /// The game's standard terrain table.
    pub fn standard(bonus_num: u64) -> Self {
        use Affinity::{Favored as F, Hindered as H, Neutral as N};
        use Biome::*;

        let rows = [
            // (biome, knight, paladin, crossbowman)
            (DeepOcean, N, H, F),
            (Ocean, N, H, F),
            (Beach, H, N, F),
            (Scorched, N, H, F),
            (Bare, N, F, H),
            (Tundra, H, F, N),
            (Snow, H, N, F),
            (TemperateDesert, H, F, N),
            (Shrubland, N, F, H),
            (Taiga, F, H, N),
            (Grassland, N, F, H),
            (TemperateDeciduousForest, F, H, N),
            (TemperateRainForest, F, H, N),
            (SubtropicalDesert, H, F, N),
            (TropicalSeasonalForest, F, H, N),
            (TropicalRainForest, F, H, N),
        ];

        rows.into_iter()
            .fold(Self::new(bonus_num), |table, (biome, knight, paladin, crossbowman)| {
                table.with_row(biome, BiomeRow::new(knight, paladin, crossbowman))
            })
    }

    #[must_use]
    pub fn with_row(mut self, biome: Biome, row: BiomeRow) -> Self {
        self.rows[biome as usize] = row;
        self
    }

    pub fn row(&self, biome: Biome) -> BiomeRow {
        self.rows[biome as usize]
    }

    /// Bonus magnitude as a plain fraction (0.3 for 30%).
    pub fn bonus_fraction(&self) -> f64 {
        self.bonus
    }
}

impl TerrainBonusOracle for BiomeBonusTable {
    fn bonus(&self, troop_type: TroopType, biome: Biome, _relics: &[RelicId]) -> f64 {
        1.0 + self.bonus * self.row(biome).affinity(troop_type).sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
    }

    #[test]
    fn biome_ids_round_trip() {
        for biome in Biome::iter() {
            assert_eq!(Biome::try_from(biome as u8), Ok(biome));
        }
        assert_eq!(Biome::try_from(17), Err(ArmyError::UnknownBiome(17)));
    }

    #[test]
    fn standard_table_multipliers() {
        let table = BiomeBonusTable::standard(3_000);

        assert_close(table.bonus(TroopType::Crossbowman, Biome::Beach, &[]), 1.3);
        assert_close(table.bonus(TroopType::Knight, Biome::Beach, &[]), 0.7);
        assert_close(table.bonus(TroopType::Paladin, Biome::Beach, &[]), 1.0);
        assert_close(table.bonus(TroopType::Knight, Biome::Taiga, &[]), 1.3);
        assert_close(table.bonus(TroopType::Paladin, Biome::Grassland, &[]), 1.3);
    }

    #[test]
    fn no_biome_is_neutral_for_everyone() {
        let table = BiomeBonusTable::standard(3_000);
        for troop_type in TroopType::iter() {
            assert_eq!(table.bonus(troop_type, Biome::None, &[]), 1.0);
        }
    }

    #[test]
    fn every_multiplier_is_one_step_from_neutral() {
        let table = BiomeBonusTable::standard(3_000);
        for biome in Biome::iter() {
            for troop_type in TroopType::iter() {
                let m = table.bonus(troop_type, biome, &[]);
                let steps = [0.7, 1.0, 1.3];
                assert!(
                    steps.iter().any(|s| (m - s).abs() < 1e-12),
                    "{biome}/{troop_type}: {m}"
                );
            }
        }
    }

    #[test]
    fn closures_act_as_oracles() {
        let oracle = |troop_type: TroopType, _: Biome, relics: &[RelicId]| {
            if troop_type == TroopType::Knight && !relics.is_empty() { 1.5 } else { 1.0 }
        };
        assert_eq!(oracle.bonus(TroopType::Knight, Biome::None, &[RelicId(7)]), 1.5);
        assert_eq!(oracle.bonus(TroopType::Knight, Biome::None, &[]), 1.0);
        assert_eq!(NeutralTerrain.bonus(TroopType::Paladin, Biome::Snow, &[]), 1.0);
    }
}
