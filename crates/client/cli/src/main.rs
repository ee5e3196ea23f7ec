//! `combat-sim`: preview battle and raid outcomes from scenario files.
mod config;
mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use combat_content::{ParametersLoader, ScenarioLoader, TerrainTableLoader, bundled};
use combat_core::{
    BiomeBonusTable, CombatParameters, CombatSimulator, EngineError, RaidSimulator,
};
use config::CliConfig;
use report::{BattleEntry, BattleOutput, ParamsOutput, RaidOutput};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "combat-sim", version, about = "Preview battle and raid outcomes")]
struct Cli {
    /// Combat parameters TOML (overrides COMBAT_PARAMS_PATH)
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    /// Terrain table RON (overrides COMBAT_TERRAIN_PATH)
    #[arg(long, global = true)]
    terrain: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Attacker fights each defender of the scenario separately
    Battle { scenario: PathBuf },
    /// Attacker raids all defenders of the scenario at once
    Raid { scenario: PathBuf },
    /// Show the constants the simulator derives from the parameters
    Params,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_overrides(cli.params, cli.terrain, cli.json);

    setup_logging();

    let params = load_parameters(config.params_path.as_deref())?;
    let terrain = load_terrain(config.terrain_path.as_deref(), &params)?;
    let simulator = CombatSimulator::new(params).map_err(|err| {
        let summary = report::engine_error_summary(&err);
        if err.severity().is_internal() {
            tracing::error!("{summary}");
        } else {
            tracing::warn!("{summary}");
        }
        anyhow::anyhow!("Invalid combat parameters: {summary}")
    })?;

    match cli.command {
        Command::Battle { scenario } => {
            let scenario = ScenarioLoader::load(&scenario)?;
            let battles = scenario
                .defenders
                .iter()
                .map(|defender| BattleEntry {
                    defender: *defender,
                    report: simulator.battle_report_with_relics(
                        &scenario.attacker,
                        defender,
                        scenario.biome,
                        &terrain,
                        &scenario.attacker_relics,
                        &scenario.defender_relics,
                    ),
                })
                .collect();

            let output = BattleOutput {
                biome: scenario.biome,
                attacker: scenario.attacker,
                battles,
            };
            report::emit(&output, config.output)
        }
        Command::Raid { scenario } => {
            let scenario = ScenarioLoader::load(&scenario)?;
            let raid = RaidSimulator::from_simulator(simulator);
            let raid_report = raid.simulate_raid_with_relics(
                &scenario.attacker,
                &scenario.defenders,
                scenario.biome,
                &terrain,
                &scenario.attacker_relics,
                &scenario.defender_relics,
            );
            let preview = raid_report.preview(
                &scenario.attacker,
                &scenario.defenders,
                raid.parameters().stamina_attack_req,
            );

            let output = RaidOutput {
                biome: scenario.biome,
                raider: scenario.attacker,
                defenders: scenario.defenders,
                report: raid_report,
                preview,
            };
            report::emit(&output, config.output)
        }
        Command::Params => report::emit(&ParamsOutput::new(&simulator), config.output),
    }
}

/// Logs go to stderr so stdout carries only the report.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn load_parameters(path: Option<&Path>) -> Result<CombatParameters> {
    match path {
        Some(path) => ParametersLoader::load(path),
        None => {
            tracing::debug!("using bundled combat parameters");
            bundled::parameters()
        }
    }
}

/// Without a terrain file the standard table is built from the loaded
/// parameters' biome bonus.
fn load_terrain(path: Option<&Path>, params: &CombatParameters) -> Result<BiomeBonusTable> {
    match path {
        Some(path) => TerrainTableLoader::load(path),
        None => Ok(BiomeBonusTable::standard(params.damage_biome_bonus_num)),
    }
}
