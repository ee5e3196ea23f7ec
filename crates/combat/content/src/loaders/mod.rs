//! Content loaders for reading combat data from files.
//!
//! Each loader exposes `load(path)` for files on disk and `from_str` for
//! in-memory sources such as the bundled defaults.

pub mod factory;
pub mod params;
pub mod scenario;
pub mod terrain;

pub use factory::ContentFactory;
pub use params::ParametersLoader;
pub use scenario::{Scenario, ScenarioLoader};
pub use terrain::{TerrainRowSpec, TerrainTableLoader, TerrainTableSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
