//! Roll orchestration
//!
//! [`Roller`] owns everything a roll touches: the card views, the trigger,
//! the audio cues, the clock, the catalog and the RNG. A roll resets the
//! cards, lets the reset settle, draws the loadout and then spins all seven
//! cards concurrently, finishing only when every card has been revealed.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::join_all;
use log::{debug, error, info, warn};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::card::{CardDeck, CardSlot, SpinContext, animate_card, reset_card};
use crate::catalog::{CatalogError, CatalogSource, load_catalog};
use crate::constants::{
    LABEL_AGAIN, LABEL_ERROR, LABEL_LOADING, LABEL_READY, LABEL_WORKING, STRATAGEM_SLOTS,
};
use crate::data::{Catalog, Item};
use crate::pacing::RollPacing;
use crate::select::{pick_one, pick_unique};
use crate::{AudioCue, CardView, Clock, Transport, TriggerView};

/// Text shown on the roll trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerLabel {
    Loading,
    Ready,
    Working,
    Again,
    Error,
}

impl TriggerLabel {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Loading => LABEL_LOADING,
            Self::Ready => LABEL_READY,
            Self::Working => LABEL_WORKING,
            Self::Again => LABEL_AGAIN,
            Self::Error => LABEL_ERROR,
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// One roll's draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Selections {
    pub primary: Option<Item>,
    pub secondary: Option<Item>,
    pub grenade: Option<Item>,
    pub stratagems: Vec<Item>,
}

impl Selections {
    /// Draw one weapon per weapon slot and unique stratagems for the rest.
    pub fn draw<R: RngCore>(catalog: &Catalog, rng: &mut R) -> Self {
        Self {
            primary: pick_one(&catalog.primaries, rng).cloned(),
            secondary: pick_one(&catalog.secondaries, rng).cloned(),
            grenade: pick_one(&catalog.grenades, rng).cloned(),
            stratagems: pick_unique(&catalog.stratagems, STRATAGEM_SLOTS, rng),
        }
    }

    /// The chosen item for every slot that received one, in slot order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(CardSlot, &Item)> {
        let weapons = [
            (CardSlot::Primary, self.primary.as_ref()),
            (CardSlot::Secondary, self.secondary.as_ref()),
            (CardSlot::Grenade, self.grenade.as_ref()),
        ];
        let stratagems = (0_u8..)
            .zip(&self.stratagems)
            .map(|(i, item)| (CardSlot::Stratagem(i), Some(item)));
        weapons
            .into_iter()
            .chain(stratagems)
            .filter_map(|(slot, item)| item.map(|item| (slot, item)))
            .collect()
    }

    #[must_use]
    pub fn get(&self, slot: CardSlot) -> Option<&Item> {
        match slot {
            CardSlot::Primary => self.primary.as_ref(),
            CardSlot::Secondary => self.secondary.as_ref(),
            CardSlot::Grenade => self.grenade.as_ref(),
            CardSlot::Stratagem(i) => self.stratagems.get(usize::from(i)),
        }
    }
}

/// Result of a roll that actually ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// 1 for the first roll of the session.
    pub roll: u32,
    pub selections: Selections,
}

pub struct Roller<C, T, A, K> {
    cards: CardDeck<C>,
    trigger: T,
    audio: A,
    clock: K,
    pacing: RollPacing,
    source: CatalogSource,
    catalog: RefCell<Rc<Catalog>>,
    rolling: Cell<bool>,
    rolls: Cell<u32>,
    rng: RefCell<ChaCha8Rng>,
}

impl<C, T, A, K> Roller<C, T, A, K>
where
    C: CardView,
    T: TriggerView,
    A: AudioCue,
    K: Clock,
{
    /// Create a roller with an empty catalog, default pacing and the default
    /// catalog source.
    pub fn new(cards: CardDeck<C>, trigger: T, audio: A, clock: K, seed: u64) -> Self {
        Self {
            cards,
            trigger,
            audio,
            clock,
            pacing: RollPacing::default(),
            source: CatalogSource::default(),
            catalog: RefCell::new(Rc::new(Catalog::empty())),
            rolling: Cell::new(false),
            rolls: Cell::new(0),
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: RollPacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: CatalogSource) -> Self {
        self.source = source;
        self
    }

    pub const fn cards(&self) -> &CardDeck<C> {
        &self.cards
    }

    pub const fn trigger(&self) -> &T {
        &self.trigger
    }

    pub const fn audio(&self) -> &A {
        &self.audio
    }

    pub const fn clock(&self) -> &K {
        &self.clock
    }

    pub const fn pacing(&self) -> &RollPacing {
        &self.pacing
    }

    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn catalog(&self) -> Rc<Catalog> {
        Rc::clone(&self.catalog.borrow())
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling.get()
    }

    /// Completed rolls so far.
    pub fn rolls(&self) -> u32 {
        self.rolls.get()
    }

    /// Fetch the catalog once. On failure the trigger stays disabled and
    /// shows the error label; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] that aborted the load.
    pub async fn load<Tr: Transport>(&self, transport: &Tr) -> Result<(), CatalogError> {
        self.trigger.set_enabled(false);
        self.trigger.set_label(TriggerLabel::Loading);
        match load_catalog(transport, &self.source).await {
            Ok(catalog) => {
                self.install_catalog(catalog);
                Ok(())
            }
            Err(err) => {
                error!("Failed to load loadout data: {err}");
                self.trigger.set_label(TriggerLabel::Error);
                Err(err)
            }
        }
    }

    /// Install an already-built catalog and arm the trigger.
    pub fn install_catalog(&self, catalog: Catalog) {
        let [primaries, secondaries, grenades, stratagems] = catalog.counts();
        info!(
            "Catalog ready: {primaries} primaries, {secondaries} secondaries, {grenades} grenades, {stratagems} stratagems"
        );
        *self.catalog.borrow_mut() = Rc::new(catalog);
        self.trigger.set_enabled(true);
        self.trigger.set_label(TriggerLabel::Ready);
    }

    /// Put every card back in its idle presentation.
    pub fn reset_cards(&self) {
        for view in self.cards.iter() {
            reset_card(view);
        }
    }

    /// Run one roll to completion.
    ///
    /// Returns `None` without touching anything when a roll is already in
    /// progress or no catalog has been loaded.
    pub async fn handle_roll(&self) -> Option<RollOutcome> {
        let catalog = self.catalog();
        if self.rolling.get() {
            debug!("Roll requested while another is in progress; ignoring");
            return None;
        }
        if !catalog.is_loaded() {
            debug!("Roll requested before the catalog loaded; ignoring");
            return None;
        }

        self.rolling.set(true);
        self.trigger.set_enabled(false);
        self.trigger.set_label(TriggerLabel::Working);
        self.play(Cue::Deploy);
        self.reset_cards();
        self.clock.sleep(self.pacing.reset_settle_ms).await;

        let selections = Selections::draw(&catalog, &mut *self.rng.borrow_mut());
        if selections.stratagems.len() < STRATAGEM_SLOTS {
            warn!(
                "Only {} stratagems available; {} stratagem card(s) stay idle",
                selections.stratagems.len(),
                STRATAGEM_SLOTS - selections.stratagems.len()
            );
        }
        let roll = self.rolls.get().saturating_add(1);
        debug!("Roll {roll} drew {selections:?}");

        let ctx = SpinContext {
            clock: &self.clock,
            pacing: &self.pacing,
            source: &self.source,
        };
        let catalog = &*catalog;
        let animations = selections.assignments().into_iter().map(|(slot, item)| {
            let mut rng = self.fork_rng();
            async move {
                if let Some(view) = self.cards.get(slot) {
                    let pool = catalog.pool(slot);
                    let duration = slot.duration_ms(&self.pacing);
                    animate_card(view, pool, item, duration, ctx, &mut rng).await;
                }
            }
        });
        join_all(animations).await;

        self.play(Cue::Success);
        self.rolls.set(roll);
        self.rolling.set(false);
        self.trigger.set_enabled(true);
        self.trigger.set_label(TriggerLabel::Again);
        debug!("Roll {roll} complete");

        Some(RollOutcome { roll, selections })
    }

    fn fork_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.rng.borrow_mut().next_u64())
    }

    fn play(&self, cue: Cue) {
        if let Err(err) = self.audio.play(cue) {
            warn!("Sound play failed. User interaction might be needed. {err}");
        }
    }
}
