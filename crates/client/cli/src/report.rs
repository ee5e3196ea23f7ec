//! Report rendering for stdout.
//!
//! Each command builds one of the output structs below. They render as
//! aligned text through `Display` or as JSON through serde.

use std::fmt;

use combat_core::{
    Army, BattleReport, Biome, CombatSimulator, EngineError, RaidPreview, RaidReport,
    TerrainAdvantage, TroopTier,
};
use serde::Serialize;

use crate::config::OutputFormat;

/// Attacker against each defender in turn.
#[derive(Debug, Serialize)]
pub struct BattleOutput {
    pub biome: Biome,
    pub attacker: Army,
    pub battles: Vec<BattleEntry>,
}

#[derive(Debug, Serialize)]
pub struct BattleEntry {
    pub defender: Army,
    pub report: BattleReport,
}

/// Attacker split across all defenders.
#[derive(Debug, Serialize)]
pub struct RaidOutput {
    pub biome: Biome,
    pub raider: Army,
    pub defenders: Vec<Army>,
    pub report: RaidReport,
    pub preview: RaidPreview,
}

/// Effective constants after fixed-point conversion.
#[derive(Debug, Serialize)]
pub struct ParamsOutput {
    pub tier_values: [f64; 3],
    pub scaling_factor: f64,
    pub beta_small: f64,
    pub beta_large: f64,
    pub c0: f64,
    pub delta: f64,
    pub stamina_attack_req: u64,
    pub biome_bonus_percent: f64,
    pub raid_damage_percent: f64,
}

impl ParamsOutput {
    pub fn new(simulator: &CombatSimulator) -> Self {
        let params = simulator.parameters();
        let (beta_small, beta_large, c0, delta) = simulator.curve();
        Self {
            tier_values: [TroopTier::T1, TroopTier::T2, TroopTier::T3]
                .map(|tier| simulator.tier_value(tier)),
            scaling_factor: simulator.scaling_factor(),
            beta_small,
            beta_large,
            c0,
            delta,
            stamina_attack_req: params.stamina_attack_req,
            biome_bonus_percent: params.damage_biome_bonus_num as f64 / 100.0,
            raid_damage_percent: params.damage_raid_percent_num as f64 / 100.0,
        }
    }
}

/// Write `output` to stdout in the requested format.
pub fn emit<T>(output: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + fmt::Display,
{
    match format {
        OutputFormat::Text => print!("{output}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(output)?),
    }
    Ok(())
}

/// One-line description of an engine error: `[CODE] severity: message`.
pub fn engine_error_summary(err: &impl EngineError) -> String {
    format!("[{}] {}: {}", err.error_code(), err.severity().as_str(), err)
}

struct ArmyLabel<'a>(&'a Army);

impl fmt::Display for ArmyLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let army = self.0;
        write!(
            f,
            "{} {} x{} (stamina {})",
            army.troop_type, army.tier, army.troop_count, army.stamina
        )
    }
}

struct AdvantageLabel(TerrainAdvantage);

impl fmt::Display for AdvantageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TerrainAdvantage::Neutral => write!(f, "neutral"),
            TerrainAdvantage::Attacker(pct) => write!(f, "attacker {pct:+}%"),
            TerrainAdvantage::Defender(pct) => write!(f, "defender {pct:+}%"),
        }
    }
}

impl fmt::Display for BattleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "battle on {}", self.biome)?;
        writeln!(f, "attacker: {}", ArmyLabel(&self.attacker))?;

        if self.battles.is_empty() {
            return writeln!(f, "no defenders");
        }

        for (index, entry) in self.battles.iter().enumerate() {
            let report = &entry.report;

            writeln!(f)?;
            writeln!(f, "[{}] defender: {}", index + 1, ArmyLabel(&entry.defender))?;
            writeln!(f, "  damage dealt    {:.2}", report.damage.attacker_damage)?;
            writeln!(f, "  damage taken    {:.2}", report.damage.defender_damage)?;
            writeln!(
                f,
                "  casualties      attacker {} / defender {}",
                report.attacker_casualties, report.defender_casualties
            )?;
            writeln!(
                f,
                "  survivors       attacker {} / defender {}",
                report.attacker_survivors, report.defender_survivors
            )?;
            writeln!(f, "  terrain         {}", AdvantageLabel(report.terrain_advantage))?;
            writeln!(f, "  winner          {}", report.winner)?;
        }
        Ok(())
    }
}

impl fmt::Display for RaidOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "raid on {}", self.biome)?;
        writeln!(f, "raider: {}", ArmyLabel(&self.raider))?;
        writeln!(
            f,
            "outcome: {} ({:.2}% success chance)",
            self.report.outcome, self.report.success_chance
        )?;
        writeln!(f, "raider damage taken     {:.2}", self.report.raider_damage_taken)?;
        writeln!(f, "defender damage taken   {:.2}", self.report.defender_damage_taken)?;
        writeln!(
            f,
            "raider left             {:.2} troops, {} stamina",
            self.preview.raider_troops_left, self.preview.raider_stamina_left
        )?;

        let rows = self
            .defenders
            .iter()
            .zip(&self.report.damage_taken_per_defender)
            .zip(&self.preview.defender_troops_left);
        for (index, ((defender, damage), left)) in rows.enumerate() {
            writeln!(
                f,
                "[{}] {}: took {:.2}, {:.2} left",
                index + 1,
                ArmyLabel(defender),
                damage,
                left
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ParamsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [t1, t2, t3] = self.tier_values;
        writeln!(f, "tier values          {t1} / {t2} / {t3}")?;
        writeln!(f, "scaling factor       {}", self.scaling_factor)?;
        writeln!(f, "beta small / large   {} / {}", self.beta_small, self.beta_large)?;
        writeln!(f, "c0 / delta           {} / {}", self.c0, self.delta)?;
        writeln!(f, "stamina attack req   {}", self.stamina_attack_req)?;
        writeln!(f, "biome bonus          {}%", self.biome_bonus_percent)?;
        writeln!(f, "raid damage          {}%", self.raid_damage_percent)
    }
}
