//! Simultaneous damage exchange between two armies.

use crate::army::{Army, TroopTier};
use crate::fixed::Fixed64;
use crate::params::{CombatParameters, ParameterError};
use crate::terrain::{Biome, RelicId, TerrainBonusOracle};

use super::result::{BattleDamage, BattleReport, TerrainAdvantage};

/// Battle damage calculator.
///
/// Fixed-point constants are converted once in [`CombatSimulator::new`] and
/// cached as `f64`, so every battle afterwards is plain float arithmetic.
/// No field is written after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatSimulator {
    params: CombatParameters,
    tier_base: f64,
    t2_multiplier: f64,
    t3_multiplier: f64,
    scaling_factor: f64,
    beta_small: f64,
    beta_large: f64,
    c0: f64,
    delta: f64,
}

impl CombatSimulator {
    /// Stamina at which a defender stops being penalised.
    pub const DEFENDER_STAMINA_CAP: u64 = 30;
    /// Defender modifier at zero stamina.
    pub const DEFENDER_MIN_MODIFIER: f64 = 0.7;
    /// Share of the defender modifier restored by stamina.
    pub const DEFENDER_STAMINA_WEIGHT: f64 = 0.3;

    pub fn new(params: CombatParameters) -> Result<Self, ParameterError> {
        params.validate()?;

        let convert = |field: &'static str, value: Fixed64| {
            value
                .to_f64()
                .map_err(|source| ParameterError::Conversion { field, source })
        };

        let simulator = Self {
            tier_base: convert("t1_damage_value", params.t1_damage_value)?,
            t2_multiplier: convert("t2_damage_multiplier", params.t2_damage_multiplier)?,
            t3_multiplier: convert("t3_damage_multiplier", params.t3_damage_multiplier)?,
            scaling_factor: convert("damage_scaling_factor", params.damage_scaling_factor)?,
            beta_small: convert("damage_beta_small", params.damage_beta_small)?,
            beta_large: convert("damage_beta_large", params.damage_beta_large)?,
            c0: convert("damage_c0", params.damage_c0)?,
            delta: convert("damage_delta", params.damage_delta)?,
            params,
        };

        // Constants that round to zero at two decimals are as unusable as raw zeros.
        if simulator.tier_base == 0.0 {
            return Err(ParameterError::ZeroTierValue);
        }
        if simulator.t2_multiplier == 0.0 {
            return Err(ParameterError::ZeroTierMultiplier(TroopTier::T2));
        }
        if simulator.t3_multiplier == 0.0 {
            return Err(ParameterError::ZeroTierMultiplier(TroopTier::T3));
        }
        if simulator.delta == 0.0 {
            return Err(ParameterError::ZeroCurveWidth);
        }

        tracing::debug!(
            tier_base = simulator.tier_base,
            t2 = simulator.t2_multiplier,
            t3 = simulator.t3_multiplier,
            scaling = simulator.scaling_factor,
            beta_small = simulator.beta_small,
            beta_large = simulator.beta_large,
            c0 = simulator.c0,
            delta = simulator.delta,
            "combat simulator ready"
        );

        Ok(simulator)
    }

    pub fn parameters(&self) -> &CombatParameters {
        &self.params
    }

    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    /// `(beta_small, beta_large, c0, delta)` as plain numbers.
    pub fn curve(&self) -> (f64, f64, f64, f64) {
        (self.beta_small, self.beta_large, self.c0, self.delta)
    }

    /// Relative strength of a tier: base, base × t2 or base × t3.
    pub fn tier_value(&self, tier: TroopTier) -> f64 {
        match tier {
            TroopTier::T1 => self.tier_base,
            TroopTier::T2 => self.tier_base * self.t2_multiplier,
            TroopTier::T3 => self.tier_base * self.t3_multiplier,
        }
    }

    /// Damage multiplier from stamina.
    ///
    /// Attackers below the requirement deal nothing; above it they gain 1%
    /// per stamina point, capped at the requirement itself. Defenders scale
    /// linearly from 0.7 at zero stamina to 1.0 at 30 and never exceed it.
    pub fn stamina_modifier(&self, stamina: u64, is_attacker: bool) -> f64 {
        if is_attacker {
            let required = self.params.stamina_attack_req;
            if stamina < required {
                return 0.0;
            }
            let bonus = (stamina - required).min(required) as f64 / 100.0;
            1.0 + bonus
        } else {
            let capped = stamina.min(Self::DEFENDER_STAMINA_CAP) as f64;
            Self::DEFENDER_MIN_MODIFIER
                + Self::DEFENDER_STAMINA_WEIGHT * capped / Self::DEFENDER_STAMINA_CAP as f64
        }
    }

    /// Damage decay exponent for a battle of `total_troops`.
    ///
    /// ```text
    /// beta = beta_small - (beta_small - beta_large) * (tanh((n - c0) / delta) + 1) / 2
    /// ```
    pub fn effective_beta(&self, total_troops: f64) -> f64 {
        let blend = (((total_troops - self.c0) / self.delta).tanh() + 1.0) / 2.0;
        self.beta_small - (self.beta_small - self.beta_large) * blend
    }

    /// Damage both sides deal in one exchange.
    pub fn simulate_battle(
        &self,
        attacker: &Army,
        defender: &Army,
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
    ) -> BattleDamage {
        self.simulate_battle_with_relics(attacker, defender, biome, terrain, &[], &[])
    }

    /// [`simulate_battle`](Self::simulate_battle) with relics forwarded to
    /// the terrain oracle for each side.
    ///
    /// # Formula
    ///
    /// ```text
    /// n      = attacker.troops + defender.troops
    /// damage = scaling * own.troops * (own.tier / other.tier)
    ///          * stamina(own) * terrain(own) / n^beta(n)
    /// ```
    ///
    /// Both sides use the same `n` and `beta`, and neither depends on the
    /// other's computed damage.
    pub fn simulate_battle_with_relics(
        &self,
        attacker: &Army,
        defender: &Army,
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
        attacker_relics: &[RelicId],
        defender_relics: &[RelicId],
    ) -> BattleDamage {
        self.exchange(attacker, defender, biome, terrain, attacker_relics, defender_relics)
            .0
    }

    /// Damage plus casualties, survivors, winner and terrain advantage.
    pub fn battle_report(
        &self,
        attacker: &Army,
        defender: &Army,
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
    ) -> BattleReport {
        self.battle_report_with_relics(attacker, defender, biome, terrain, &[], &[])
    }

    pub fn battle_report_with_relics(
        &self,
        attacker: &Army,
        defender: &Army,
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
        attacker_relics: &[RelicId],
        defender_relics: &[RelicId],
    ) -> BattleReport {
        let (damage, advantage) =
            self.exchange(attacker, defender, biome, terrain, attacker_relics, defender_relics);
        BattleReport::new(attacker, defender, damage, advantage)
    }

    fn exchange(
        &self,
        attacker: &Army,
        defender: &Army,
        biome: Biome,
        terrain: &(impl TerrainBonusOracle + ?Sized),
        attacker_relics: &[RelicId],
        defender_relics: &[RelicId],
    ) -> (BattleDamage, TerrainAdvantage) {
        let attacker_terrain = terrain.bonus(attacker.troop_type, biome, attacker_relics);
        let defender_terrain = terrain.bonus(defender.troop_type, biome, defender_relics);
        let advantage = TerrainAdvantage::from_multipliers(attacker_terrain, defender_terrain);

        // u64 + u64 always fits in u128
        let total_troops = u128::from(attacker.troop_count) + u128::from(defender.troop_count);
        if total_troops == 0 {
            return (BattleDamage::ZERO, advantage);
        }

        let total = total_troops as f64;
        let beta = self.effective_beta(total);
        let denominator = total.powf(beta);

        let attacker_tier = self.tier_value(attacker.tier);
        let defender_tier = self.tier_value(defender.tier);

        let attacker_damage = self.scaling_factor
            * attacker.troop_count as f64
            * (attacker_tier / defender_tier)
            * self.stamina_modifier(attacker.stamina, true)
            * attacker_terrain
            / denominator;

        let defender_damage = self.scaling_factor
            * defender.troop_count as f64
            * (defender_tier / attacker_tier)
            * self.stamina_modifier(defender.stamina, false)
            * defender_terrain
            / denominator;

        tracing::trace!(
            total_troops = total,
            beta,
            attacker_damage,
            defender_damage,
            %biome,
            "battle exchange"
        );

        (
            BattleDamage {
                attacker_damage,
                defender_damage,
            },
            advantage,
        )
    }
}
