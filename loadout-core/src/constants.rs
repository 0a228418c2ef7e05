//! Fixed endpoints, pacing defaults and presentation strings for the roller.
//!
//! Pacing values here are the fallbacks used when the static pacing asset is
//! missing a field; the asset itself ships with the same numbers.

// Catalog source -----------------------------------------------------------
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/Faryzal2020/helldivers-2-database/main/";
pub const PRIMARIES_PATH: &str = "data/weapons/primary.json";
pub const SECONDARIES_PATH: &str = "data/weapons/secondary.json";
pub const GRENADES_PATH: &str = "data/weapons/grenades.json";
pub const STRATAGEMS_PATH: &str = "data/stratagems/list.json";

// Pacing -------------------------------------------------------------------
pub(crate) const TICK_MS: u32 = 60;
pub(crate) const NAME_REVEAL_TICKS: u32 = 4;
pub(crate) const RESET_SETTLE_MS: u32 = 100;
pub(crate) const PRIMARY_MS: u32 = 1_500;
pub(crate) const SECONDARY_MS: u32 = 1_700;
pub(crate) const GRENADE_MS: u32 = 1_900;
pub(crate) const STRATAGEM_BASE_MS: u32 = 2_100;
pub(crate) const STRATAGEM_STEP_MS: u32 = 200;

// Loadout shape ------------------------------------------------------------
pub const STRATAGEM_SLOTS: usize = 4;

// Trigger labels -----------------------------------------------------------
pub const LABEL_LOADING: &str = "LOADING...";
pub const LABEL_READY: &str = "DEPLOY!";
pub const LABEL_WORKING: &str = "DEPLOYING...";
pub const LABEL_AGAIN: &str = "GO AGAIN, DIVER!";
pub const LABEL_ERROR: &str = "DATA ERROR";
