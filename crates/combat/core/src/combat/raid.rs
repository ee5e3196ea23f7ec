//! Raid resolution: one raider against every defender of a target.

use crate::army::Army;
use crate::params::{CombatParameters, PERCENT_DENOMINATOR, ParameterError};
use crate::terrain::{Biome, RelicId, TerrainBonusOracle};

use super::result::{RaidOutcome, RaidReport};
use super::simulator::CombatSimulator;

/// Raid calculator built on a [`CombatSimulator`].
#[derive(Clone, Debug, PartialEq)]
pub struct RaidSimulator {
    combat: CombatSimulator,
}

impl RaidSimulator {
    /// Damage ratio beyond which a side dominates the raid.
    pub const DOMINANCE_RATIO: f64 = 2.0;
    /// Ratio at or below which a raid cannot succeed.
    pub const HOPELESS_RATIO: f64 = 0.5;

    pub fn new(params: CombatParameters) -> Result<Self, ParameterError> {
        CombatSimulator::new(params).map(Self::from_simulator)
    }

    pub fn from_simulator(combat: CombatSimulator) -> Self {
        Self { combat }
    }

    pub fn combat(&self) -> &CombatSimulator {
        &self.combat
    }

    pub fn parameters(&self) -> &CombatParameters {
        self.combat.parameters()
    }

    /// Symmetric 2:1 dominance rule with a contested middle band.
    pub fn raid_outcome(attacker_damage: f64, defender_damage: f64) -> RaidOutcome {
        if attacker_damage > Self::DOMINANCE_RATIO * defender_damage {
            RaidOutcome::Success
        } else if defender_damage > Self::DOMINANCE_RATIO * attacker_damage {
            RaidOutcome::Failure
        } else {
            RaidOutcome::Chance
        }
    }

    /// Success probability in percent.
    ///
    /// No opposing damage is a sure success. Otherwise the damage ratio maps
    /// linearly from 0% at 0.5 to 100% at 2.
    pub fn success_chance(attacker_damage: f64, defender_damage: f64) -> f64 {
        if defender_damage == 0.0 {
            return 100.0;
        }

        let ratio = attacker_damage / defender_damage;
        if ratio <= Self::HOPELESS_RATIO {
            return 0.0;
        }
        if ratio >= Self::DOMINANCE_RATIO {
            return 100.0;
        }

        let span = Self::DOMINANCE_RATIO - Self::HOPELESS_RATIO;
        (((ratio - Self::HOPELESS_RATIO) / span) * 100.0).clamp(0.0, 100.0)
    }

    pub fn simulate_raid(
        &self,
        raider: &Army,
        defenders: &[Army],
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
    ) -> RaidReport {
        self.simulate_raid_with_relics(raider, defenders, biome, terrain, &[], &[])
    }

    /// Raid with relics forwarded to the terrain oracle.
    ///
    /// The raider is split evenly (floor division) across all defenders and
    /// fights each of them in parallel. Each exchange is scaled down to raid
    /// size and clamped so neither side loses more troops than it fielded.
    /// Leftover troops from the division sit out.
    pub fn simulate_raid_with_relics(
        &self,
        raider: &Army,
        defenders: &[Army],
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
        raider_relics: &[RelicId],
        defender_relics: &[RelicId],
    ) -> RaidReport {
        if defenders.iter().all(Army::is_empty) {
            tracing::debug!(defenders = defenders.len(), "raid target undefended");
            return RaidReport::undefended(defenders.len());
        }

        let detachment = raider.with_troop_count(raider.troop_count / defenders.len() as u64);
        let raid_percent = self.parameters().damage_raid_percent_num as f64;

        let mut raider_damage_taken = 0.0;
        let mut defender_damage_taken = 0.0;
        let mut damage_taken_per_defender = Vec::with_capacity(defenders.len());

        for (index, defender) in defenders.iter().enumerate() {
            if defender.is_empty() {
                damage_taken_per_defender.push(0.0);
                continue;
            }

            let battle = self.combat.simulate_battle_with_relics(
                &detachment,
                defender,
                biome,
                terrain,
                raider_relics,
                defender_relics,
            );

            let dealt = (battle.attacker_damage * raid_percent / PERCENT_DENOMINATOR as f64)
                .min(defender.troop_count as f64);
            let taken = (battle.defender_damage * raid_percent / PERCENT_DENOMINATOR as f64)
                .min(detachment.troop_count as f64);

            tracing::trace!(index, dealt, taken, "raid exchange");

            defender_damage_taken += dealt;
            raider_damage_taken += taken;
            damage_taken_per_defender.push(dealt);
        }

        let outcome = Self::raid_outcome(defender_damage_taken, raider_damage_taken);
        let success_chance = Self::success_chance(defender_damage_taken, raider_damage_taken);

        tracing::debug!(
            %outcome,
            success_chance,
            raider_damage_taken,
            defender_damage_taken,
            "raid resolved"
        );

        RaidReport {
            raider_damage_taken,
            defender_damage_taken,
            damage_taken_per_defender,
            outcome,
            success_chance,
        }
    }
}
