//! Deterministic combat and raid damage simulation.
//!
//! `combat-core` reproduces, off-chain, the damage numbers the settlement
//! contract computes for a battle or a raid. Constants arrive as 64.64
//! fixed-point integers and are converted exactly once, at simulator
//! construction, through [`fixed::divide_with_precision`]. Every call after
//! that is a pure function of its arguments, so a single [`CombatSimulator`]
//! or [`RaidSimulator`] can be shared freely across threads.
pub mod army;
pub mod combat;
pub mod error;
pub mod fixed;
pub mod params;
pub mod terrain;

pub use army::{Army, ArmyError, TroopTier, TroopType};
pub use combat::{
    BattleDamage, BattleReport, BattleWinner, CombatSimulator, RaidOutcome, RaidPreview,
    RaidReport, RaidSimulator, TerrainAdvantage,
};
pub use error::{EngineError, ErrorSeverity};
pub use fixed::{Fixed64, FixedPointError, divide_with_precision};
pub use params::{CombatParameters, ParameterError};
pub use terrain::{Biome, BiomeBonusTable, NeutralTerrain, RelicId, TerrainBonusOracle};
