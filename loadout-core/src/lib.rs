//! Loadout Roller Engine
//!
//! Platform-agnostic core for the loadout roller: catalog loading, random
//! selection, the per-card spin animation and roll orchestration.
//! This crate has no browser dependencies; the page, the network, timers and
//! audio are reached through the traits below.

pub mod audio;
pub mod card;
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod data;
pub mod headless;
pub mod pacing;
pub mod roller;
pub mod select;

// Re-export commonly used types
pub use audio::{AudioError, Cue};
pub use card::{CardDeck, CardSlot, CardState, SpinContext, animate_card, reset_card};
pub use catalog::{
    CatalogError, CatalogResource, CatalogSource, HttpResponse, TransportError, load_catalog,
};
pub use clock::{ClockError, VirtualClock};
pub use data::{Catalog, Item, StratagemGroups, flatten_stratagems};
pub use pacing::RollPacing;
pub use roller::{RollOutcome, Roller, Selections, TriggerLabel};
pub use select::{pick_one, pick_unique};

/// Trait for abstracting catalog requests
/// Platform-specific implementations should provide this
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Issue a GET request and read the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received at all; HTTP
    /// error statuses are reported through [`HttpResponse::status`].
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Trait for abstracting timers
/// Platform-specific implementations should provide this
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Complete after `ms` milliseconds of this clock's time.
    async fn sleep(&self, ms: u32);
}

/// One card on the page: an image, a label and a container whose
/// presentation follows [`CardState`].
pub trait CardView {
    fn set_image(&self, src: &str);
    fn set_label(&self, text: &str);
    fn set_state(&self, state: CardState);
}

/// The control that starts a roll.
pub trait TriggerView {
    fn set_enabled(&self, enabled: bool);
    fn set_label(&self, label: TriggerLabel);
}

/// Sound effects
pub trait AudioCue {
    /// Start playing `cue` from the beginning.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn play(&self, cue: Cue) -> Result<(), AudioError>;
}
