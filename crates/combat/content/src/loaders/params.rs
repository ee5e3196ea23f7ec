//! Combat parameters loader.

use std::path::Path;

use combat_core::{CombatParameters, EngineError};

use crate::loaders::{LoadResult, read_file};

/// Loader for combat parameters from TOML files.
///
/// Missing keys fall back to the documented defaults. The result is
/// validated, so a file that would make the damage formula degenerate is
/// rejected here rather than at simulator construction.
pub struct ParametersLoader;

impl ParametersLoader {
    /// Load parameters from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatParameters> {
        let content = read_file(path)?;
        let params = Self::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded combat parameters");
        Ok(params)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<CombatParameters> {
        let params: CombatParameters = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat parameters TOML: {}", e))?;

        params
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid combat parameters [{}]: {}", e.error_code(), e))?;

        Ok(params)
    }
}
