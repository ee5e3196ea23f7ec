//! Battle and raid scenario loader.

use std::path::Path;

use combat_core::{Army, Biome, RelicId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One engagement: an attacker, the armies it faces and the ground.
///
/// The same file drives both a battle (attacker against each defender in
/// turn) and a raid (attacker split across all defenders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub biome: Biome,
    #[serde(alias = "raider")]
    pub attacker: Army,
    #[serde(default)]
    pub defenders: Vec<Army>,
    #[serde(default)]
    pub attacker_relics: Vec<RelicId>,
    #[serde(default)]
    pub defender_relics: Vec<RelicId>,
}

/// Loader for scenarios from TOML files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario = Self::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            biome = %scenario.biome,
            defenders = scenario.defenders.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<Scenario> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))
    }
}
