//! Battle and raid damage resolution.
//!
//! All functions are deterministic and side-effect free apart from tracing.
//!
//! # Architecture
//!
//! - **CombatSimulator**: one simultaneous damage exchange between two armies
//! - **RaidSimulator**: splits a raider across several defenders, scales the
//!   exchange down to raid size and classifies the result
//! - **Results**: plain value types returned to callers

pub mod raid;
pub mod result;
pub mod simulator;

pub use raid::RaidSimulator;
pub use result::{
    BattleDamage, BattleReport, BattleWinner, RaidOutcome, RaidPreview, RaidReport,
    TerrainAdvantage,
};
pub use simulator::CombatSimulator;
