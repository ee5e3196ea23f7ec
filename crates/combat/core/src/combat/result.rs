//! Combat result types.

use crate::army::Army;

/// Damage each side inflicts in one simultaneous exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleDamage {
    /// Damage dealt by the attacker to the defender.
    pub attacker_damage: f64,
    /// Damage dealt by the defender to the attacker.
    pub defender_damage: f64,
}

impl BattleDamage {
    pub const ZERO: Self = Self {
        attacker_damage: 0.0,
        defender_damage: 0.0,
    };
}

/// Which side came out ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleWinner {
    Attacker,
    Defender,
    Draw,
}

/// Which side the battlefield favours, with the favoured side's edge over
/// the other in whole percentage points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerrainAdvantage {
    Neutral,
    Attacker(i64),
    Defender(i64),
}

impl TerrainAdvantage {
    /// Compare the two multipliers the oracle returned. A hindered side
    /// counts against it: 0.7 against 1.0 is a 30 point edge for the other.
    pub fn from_multipliers(attacker: f64, defender: f64) -> Self {
        let edge = |favoured: f64, other: f64| ((favoured - other) * 100.0).round() as i64;
        if attacker > defender {
            Self::Attacker(edge(attacker, defender))
        } else if defender > attacker {
            Self::Defender(edge(defender, attacker))
        } else {
            Self::Neutral
        }
    }
}

/// Full-battle preview: damage plus the casualties it implies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub damage: BattleDamage,
    pub attacker_casualties: u64,
    pub defender_casualties: u64,
    pub attacker_survivors: u64,
    pub defender_survivors: u64,
    pub winner: BattleWinner,
    pub terrain_advantage: TerrainAdvantage,
}

impl BattleReport {
    pub(crate) fn new(
        attacker: &Army,
        defender: &Army,
        damage: BattleDamage,
        terrain_advantage: TerrainAdvantage,
    ) -> Self {
        let attacker_casualties = casualties(damage.defender_damage, attacker.troop_count);
        let defender_casualties = casualties(damage.attacker_damage, defender.troop_count);

        let winner = if damage.attacker_damage > damage.defender_damage {
            BattleWinner::Attacker
        } else if damage.defender_damage > damage.attacker_damage {
            BattleWinner::Defender
        } else {
            BattleWinner::Draw
        };

        Self {
            damage,
            attacker_casualties,
            defender_casualties,
            attacker_survivors: attacker.troop_count - attacker_casualties,
            defender_survivors: defender.troop_count - defender_casualties,
            winner,
            terrain_advantage,
        }
    }
}

/// Whole troops lost: floor of the damage, never more than the army has.
fn casualties(damage: f64, troop_count: u64) -> u64 {
    // `as` saturates, so NaN maps to 0 and huge values to u64::MAX
    (damage.floor() as u64).min(troop_count)
}

/// Three-way raid classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RaidOutcome {
    /// Raider out-damages the defence more than two to one.
    Success,
    /// Defence out-damages the raider more than two to one.
    Failure,
    /// Contested; settled by chance.
    Chance,
}

/// Aggregate result of a raid against every defender of a target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaidReport {
    /// Total damage the defenders dealt to the raider.
    pub raider_damage_taken: f64,
    /// Total damage the raider dealt across all defenders.
    pub defender_damage_taken: f64,
    /// Damage the raider dealt to each defender, in input order. Empty
    /// defenders get 0.
    pub damage_taken_per_defender: Vec<f64>,
    pub outcome: RaidOutcome,
    /// Success probability in percent, 0..=100.
    pub success_chance: f64,
}

impl RaidReport {
    /// Report for a target with nothing to fight.
    pub fn undefended(defender_count: usize) -> Self {
        Self {
            raider_damage_taken: 0.0,
            defender_damage_taken: 0.0,
            damage_taken_per_defender: vec![0.0; defender_count],
            outcome: RaidOutcome::Success,
            success_chance: 100.0,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.outcome == RaidOutcome::Success
    }

    /// Troops and stamina left on each side if the raid plays out as
    /// reported. `defenders` must be the list the report was computed from.
    pub fn preview(&self, raider: &Army, defenders: &[Army], stamina_attack_req: u64) -> RaidPreview {
        let defender_troops_left = defenders
            .iter()
            .zip(self.damage_taken_per_defender.iter().copied())
            .map(|(defender, damage)| (defender.troop_count as f64 - damage).max(0.0))
            .collect();

        RaidPreview {
            raider_troops_left: (raider.troop_count as f64 - self.raider_damage_taken).max(0.0),
            defender_troops_left,
            raider_stamina_left: raider.stamina.saturating_sub(stamina_attack_req),
        }
    }
}

/// What each side would have left after a raid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaidPreview {
    pub raider_troops_left: f64,
    pub defender_troops_left: Vec<f64>,
    pub raider_stamina_left: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::{TroopTier, TroopType};

    #[test]
    fn casualties_floor_and_clamp() {
        assert_eq!(casualties(9.99, 100), 9);
        assert_eq!(casualties(250.0, 100), 100);
        assert_eq!(casualties(0.0, 0), 0);
    }

    #[test]
    fn report_picks_winner_by_damage() {
        let attacker = Army::new(TroopType::Knight, TroopTier::T1, 50, 30);
        let defender = Army::new(TroopType::Paladin, TroopTier::T1, 20, 30);
        let damage = BattleDamage {
            attacker_damage: 25.7,
            defender_damage: 4.2,
        };

        let report = BattleReport::new(&attacker, &defender, damage, TerrainAdvantage::Neutral);

        assert_eq!(report.winner, BattleWinner::Attacker);
        assert_eq!(report.defender_casualties, 20);
        assert_eq!(report.defender_survivors, 0);
        assert_eq!(report.attacker_casualties, 4);
        assert_eq!(report.attacker_survivors, 46);

        let tied = BattleReport::new(&attacker, &defender, BattleDamage::ZERO, TerrainAdvantage::Neutral);
        assert_eq!(tied.winner, BattleWinner::Draw);
    }

    #[test]
    fn terrain_advantage_reports_favoured_side() {
        assert_eq!(TerrainAdvantage::from_multipliers(1.3, 1.0), TerrainAdvantage::Attacker(30));
        assert_eq!(TerrainAdvantage::from_multipliers(0.7, 1.0), TerrainAdvantage::Defender(30));
        assert_eq!(TerrainAdvantage::from_multipliers(1.3, 0.7), TerrainAdvantage::Attacker(60));
        assert_eq!(TerrainAdvantage::from_multipliers(1.0, 1.0), TerrainAdvantage::Neutral);
    }

    #[test]
    fn preview_subtracts_damage_per_defender() {
        let raider = Army::new(TroopType::Knight, TroopTier::T2, 100, 45);
        let defenders = [
            Army::new(TroopType::Crossbowman, TroopTier::T1, 10, 30),
            Army::new(TroopType::Crossbowman, TroopTier::T1, 0, 30),
        ];
        let report = RaidReport {
            raider_damage_taken: 12.5,
            defender_damage_taken: 14.0,
            damage_taken_per_defender: vec![14.0, 0.0],
            outcome: RaidOutcome::Chance,
            success_chance: 40.0,
        };

        let preview = report.preview(&raider, &defenders, 30);

        assert_eq!(preview.raider_troops_left, 87.5);
        assert_eq!(preview.defender_troops_left, vec![0.0, 0.0]);
        assert_eq!(preview.raider_stamina_left, 15);
    }

    #[test]
    fn undefended_report_is_a_free_success() {
        let report = RaidReport::undefended(3);
        assert!(report.is_successful());
        assert_eq!(report.success_chance, 100.0);
        assert_eq!(report.damage_taken_per_defender, vec![0.0; 3]);
    }
}
