//! Content compiled into the binary, used when no data directory is given.

use combat_core::{BiomeBonusTable, CombatParameters};

use crate::loaders::{LoadResult, ParametersLoader, TerrainTableLoader};

/// Source of `data/combat.toml`.
pub const COMBAT_TOML: &str = include_str!("../data/combat.toml");

/// Source of `data/terrain.ron`.
pub const TERRAIN_RON: &str = include_str!("../data/terrain.ron");

pub fn parameters() -> LoadResult<CombatParameters> {
    ParametersLoader::from_str(COMBAT_TOML)
}

pub fn terrain() -> LoadResult<BiomeBonusTable> {
    TerrainTableLoader::from_str(TERRAIN_RON)
}
