//! Tunable combat constants.
//!
//! Values mirror the settlement contract's damage configuration. Fractional
//! constants are 64.64 fixed-point integers; counters and percentages are
//! plain integers.

use crate::army::TroopTier;
use crate::error::{EngineError, ErrorSeverity};
use crate::fixed::{Fixed64, FixedPointError};

/// Denominator for every `*_num` percentage field.
pub const PERCENT_DENOMINATOR: u64 = 10_000;

/// Combat configuration shared by many computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParameters {
    /// Minimum stamina an attacker needs to deal any damage.
    pub stamina_attack_req: u64,
    /// Terrain bonus magnitude, out of 10 000.
    pub damage_biome_bonus_num: u64,
    /// Share of full-battle damage a raid deals, out of 10 000.
    pub damage_raid_percent_num: u64,
    pub damage_beta_small: Fixed64,
    pub damage_beta_large: Fixed64,
    pub damage_scaling_factor: Fixed64,
    /// Troop count at the centre of the beta transition.
    pub damage_c0: Fixed64,
    /// Width of the beta transition.
    pub damage_delta: Fixed64,
    pub t1_damage_value: Fixed64,
    pub t2_damage_multiplier: Fixed64,
    pub t3_damage_multiplier: Fixed64,
}

impl CombatParameters {
    // ===== documented defaults =====
    pub const DEFAULT_STAMINA_ATTACK_REQ: u64 = 30;
    pub const DEFAULT_BIOME_BONUS_NUM: u64 = 3_000;
    pub const DEFAULT_RAID_PERCENT_NUM: u64 = 1_000;
    /// 0.25
    pub const DEFAULT_BETA_SMALL: Fixed64 = Fixed64::from_raw(4_611_686_018_427_387_904);
    /// 0.12
    pub const DEFAULT_BETA_LARGE: Fixed64 = Fixed64::from_raw(2_213_609_288_845_146_193);
    /// 3.5
    pub const DEFAULT_SCALING_FACTOR: Fixed64 = Fixed64::from_raw(64_563_604_257_983_430_656);
    pub const DEFAULT_C0: Fixed64 = Fixed64::from_int(100_000);
    pub const DEFAULT_DELTA: Fixed64 = Fixed64::from_int(50_000);
    pub const DEFAULT_T1_DAMAGE_VALUE: Fixed64 = Fixed64::from_int(100);
    /// 2.5
    pub const DEFAULT_T2_MULTIPLIER: Fixed64 = Fixed64::from_raw(46_116_860_184_273_879_040);
    pub const DEFAULT_T3_MULTIPLIER: Fixed64 = Fixed64::from_int(7);

    pub const fn new() -> Self {
        Self {
            stamina_attack_req: Self::DEFAULT_STAMINA_ATTACK_REQ,
            damage_biome_bonus_num: Self::DEFAULT_BIOME_BONUS_NUM,
            damage_raid_percent_num: Self::DEFAULT_RAID_PERCENT_NUM,
            damage_beta_small: Self::DEFAULT_BETA_SMALL,
            damage_beta_large: Self::DEFAULT_BETA_LARGE,
            damage_scaling_factor: Self::DEFAULT_SCALING_FACTOR,
            damage_c0: Self::DEFAULT_C0,
            damage_delta: Self::DEFAULT_DELTA,
            t1_damage_value: Self::DEFAULT_T1_DAMAGE_VALUE,
            t2_damage_multiplier: Self::DEFAULT_T2_MULTIPLIER,
            t3_damage_multiplier: Self::DEFAULT_T3_MULTIPLIER,
        }
    }

    #[must_use]
    pub const fn with_raid_percent_num(mut self, raid_percent_num: u64) -> Self {
        self.damage_raid_percent_num = raid_percent_num;
        self
    }

    #[must_use]
    pub const fn with_stamina_attack_req(mut self, stamina_attack_req: u64) -> Self {
        self.stamina_attack_req = stamina_attack_req;
        self
    }

    /// Reject configurations that would make the damage formula divide by
    /// zero or produce NaN.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.t1_damage_value.is_zero() {
            return Err(ParameterError::ZeroTierValue);
        }
        if self.t2_damage_multiplier.is_zero() {
            return Err(ParameterError::ZeroTierMultiplier(TroopTier::T2));
        }
        if self.t3_damage_multiplier.is_zero() {
            return Err(ParameterError::ZeroTierMultiplier(TroopTier::T3));
        }
        if self.damage_delta.is_zero() {
            return Err(ParameterError::ZeroCurveWidth);
        }
        if self.damage_raid_percent_num > PERCENT_DENOMINATOR {
            return Err(ParameterError::RaidPercentOutOfRange(
                self.damage_raid_percent_num,
            ));
        }
        Ok(())
    }
}

impl Default for CombatParameters {
    fn default() -> Self {
        Self::new()
    }
}

/// Configurations the engine refuses to run with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("t1 damage value is zero, tier ratios are undefined")]
    ZeroTierValue,

    #[error("{0} damage multiplier is zero, tier ratios are undefined")]
    ZeroTierMultiplier(TroopTier),

    #[error("damage delta is zero, the beta transition has no width")]
    ZeroCurveWidth,

    #[error("raid percent {0} exceeds 10000")]
    RaidPercentOutOfRange(u64),

    #[error("failed to convert {field}: {source}")]
    Conversion {
        field: &'static str,
        source: FixedPointError,
    },
}

impl EngineError for ParameterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Conversion { source, .. } => source.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroTierValue => "PARAM_ZERO_TIER_VALUE",
            Self::ZeroTierMultiplier(_) => "PARAM_ZERO_TIER_MULTIPLIER",
            Self::ZeroCurveWidth => "PARAM_ZERO_CURVE_WIDTH",
            Self::RaidPercentOutOfRange(_) => "PARAM_RAID_PERCENT_OUT_OF_RANGE",
            Self::Conversion { .. } => "PARAM_CONVERSION",
        }
    }
}
