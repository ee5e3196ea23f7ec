//! CLI configuration from the process environment.
use std::env;
use std::path::PathBuf;

/// How reports are written to stdout.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub params_path: Option<PathBuf>,
    pub terrain_path: Option<PathBuf>,
    pub output: OutputFormat,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_PARAMS_PATH` - Combat parameters TOML (default: bundled)
    /// - `COMBAT_TERRAIN_PATH` - Terrain table RON (default: standard table)
    /// - `COMBAT_OUTPUT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.params_path = env::var("COMBAT_PARAMS_PATH").ok().map(PathBuf::from);
        config.terrain_path = env::var("COMBAT_TERRAIN_PATH").ok().map(PathBuf::from);

        if let Some(output) = read_env::<OutputFormat>("COMBAT_OUTPUT") {
            config.output = output;
        }

        config
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(
        mut self,
        params: Option<PathBuf>,
        terrain: Option<PathBuf>,
        json: bool,
    ) -> Self {
        if params.is_some() {
            self.params_path = params;
        }
        if terrain.is_some() {
            self.terrain_path = terrain;
        }
        if json {
            self.output = OutputFormat::Json;
        }
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
