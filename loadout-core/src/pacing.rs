//! Roll pacing configuration
use serde::{Deserialize, Serialize};

use crate::constants::{
    GRENADE_MS, NAME_REVEAL_TICKS, PRIMARY_MS, RESET_SETTLE_MS, SECONDARY_MS, STRATAGEM_BASE_MS,
    STRATAGEM_STEP_MS, TICK_MS,
};

const DEFAULT_PACING_DATA: &str = include_str!("../../loadout-web/static/assets/data/pacing.json");

/// Timings for one roll, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollPacing {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
    #[serde(default = "default_name_reveal_ticks")]
    pub name_reveal_ticks: u32,
    #[serde(default = "default_reset_settle_ms")]
    pub reset_settle_ms: u32,
    #[serde(default = "default_primary_ms")]
    pub primary_ms: u32,
    #[serde(default = "default_secondary_ms")]
    pub secondary_ms: u32,
    #[serde(default = "default_grenade_ms")]
    pub grenade_ms: u32,
    #[serde(default = "default_stratagem_base_ms")]
    pub stratagem_base_ms: u32,
    #[serde(default = "default_stratagem_step_ms")]
    pub stratagem_step_ms: u32,
}

impl Default for RollPacing {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            name_reveal_ticks: NAME_REVEAL_TICKS,
            reset_settle_ms: RESET_SETTLE_MS,
            primary_ms: PRIMARY_MS,
            secondary_ms: SECONDARY_MS,
            grenade_ms: GRENADE_MS,
            stratagem_base_ms: STRATAGEM_BASE_MS,
            stratagem_step_ms: STRATAGEM_STEP_MS,
        }
    }
}

impl RollPacing {
    /// Load pacing from the bundled static asset, falling back to defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_PACING_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Spin duration for the stratagem card at `index`.
    #[must_use]
    pub fn stratagem_ms(&self, index: usize) -> u32 {
        let step = u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.stratagem_step_ms);
        self.stratagem_base_ms.saturating_add(step)
    }

    /// Number of spin ticks that fit in `duration_ms`.
    #[must_use]
    pub fn ticks_for(&self, duration_ms: u32) -> u32 {
        if self.tick_ms == 0 {
            return 0;
        }
        duration_ms / self.tick_ms
    }
}

fn default_tick_ms() -> u32 {
    TICK_MS
}

fn default_name_reveal_ticks() -> u32 {
    NAME_REVEAL_TICKS
}

fn default_reset_settle_ms() -> u32 {
    RESET_SETTLE_MS
}

fn default_primary_ms() -> u32 {
    PRIMARY_MS
}

fn default_secondary_ms() -> u32 {
    SECONDARY_MS
}

fn default_grenade_ms() -> u32 {
    GRENADE_MS
}

fn default_stratagem_base_ms() -> u32 {
    STRATAGEM_BASE_MS
}

fn default_stratagem_step_ms() -> u32 {
    STRATAGEM_STEP_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_asset_matches_defaults() {
        assert_eq!(RollPacing::load_from_static(), RollPacing::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let pacing: RollPacing = serde_json::from_str(r#"{ "tick_ms": 30 }"#).unwrap();
        assert_eq!(pacing.tick_ms, 30);
        assert_eq!(pacing.primary_ms, 1_500);
        assert_eq!(pacing.reset_settle_ms, 100);
    }

    #[test]
    fn stratagem_durations_are_staggered() {
        let pacing = RollPacing::default();
        let durations: Vec<u32> = (0..4).map(|i| pacing.stratagem_ms(i)).collect();
        assert_eq!(durations, vec![2_100, 2_300, 2_500, 2_700]);
    }

    #[test]
    fn ticks_floor_the_duration() {
        let pacing = RollPacing::default();
        assert_eq!(pacing.ticks_for(1_500), 25);
        assert_eq!(pacing.ticks_for(1_700), 28);
        assert_eq!(pacing.ticks_for(59), 0);

        let zero = RollPacing {
            tick_ms: 0,
            ..RollPacing::default()
        };
        assert_eq!(zero.ticks_for(1_500), 0);
    }
}
