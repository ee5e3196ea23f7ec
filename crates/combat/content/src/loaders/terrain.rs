//! Terrain bonus table loader.
//!
//! Loads a biome table from RON. Biomes absent from the file are neutral.

use std::path::Path;

use combat_core::terrain::{Affinity, BiomeRow};
use combat_core::{Biome, BiomeBonusTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Terrain table as written in RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainTableSpec {
    /// Bonus magnitude out of 10 000.
    pub bonus_num: u64,
    #[serde(default)]
    pub rows: Vec<TerrainRowSpec>,
}

/// One biome's affinities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainRowSpec {
    pub biome: Biome,
    #[serde(default)]
    pub knight: Affinity,
    #[serde(default)]
    pub paladin: Affinity,
    #[serde(default)]
    pub crossbowman: Affinity,
}

impl TerrainTableSpec {
    /// Build the table. A biome listed twice keeps its last row.
    pub fn into_table(self) -> BiomeBonusTable {
        self.rows
            .into_iter()
            .fold(BiomeBonusTable::new(self.bonus_num), |table, row| {
                table.with_row(row.biome, BiomeRow::new(row.knight, row.paladin, row.crossbowman))
            })
    }
}

/// Loader for terrain bonus tables from RON files.
pub struct TerrainTableLoader;

impl TerrainTableLoader {
    pub fn load(path: &Path) -> LoadResult<BiomeBonusTable> {
        let content = read_file(path)?;
        let table = Self::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded terrain table");
        Ok(table)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<BiomeBonusTable> {
        let spec: TerrainTableSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse terrain table RON: {}", e))?;
        Ok(spec.into_table())
    }
}
