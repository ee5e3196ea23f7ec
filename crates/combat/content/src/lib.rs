//! Data-driven combat content and loaders.
//!
//! This crate ships the default combat data and loads it from TOML/RON:
//! - Combat parameters (data-driven via TOML)
//! - Terrain bonus tables (data-driven via RON)
//! - Battle and raid scenarios (data-driven via TOML)
//!
//! All loaders use combat-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod bundled;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, LoadResult, ParametersLoader, Scenario, ScenarioLoader, TerrainRowSpec,
    TerrainTableLoader, TerrainTableSpec,
};
