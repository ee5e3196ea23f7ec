//! Content factory for loading combat data from a directory.

use std::path::{Path, PathBuf};

use combat_core::{BiomeBonusTable, CombatParameters};

use crate::loaders::{LoadResult, ParametersLoader, Scenario, ScenarioLoader, TerrainTableLoader};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── terrain.ron
/// └── scenarios/
///     ├── split_raid.toml
///     └── beach_assault.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat parameters from `combat.toml`.
    pub fn load_parameters(&self) -> LoadResult<CombatParameters> {
        ParametersLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load the terrain table from `terrain.ron`.
    pub fn load_terrain(&self) -> LoadResult<BiomeBonusTable> {
        TerrainTableLoader::load(&self.data_dir.join("terrain.ron"))
    }

    /// Load a scenario from `scenarios/{name}.toml`.
    ///
    /// # Arguments
    ///
    /// * `name` - Scenario file name without the `.toml` extension
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.toml", name));
        ScenarioLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
