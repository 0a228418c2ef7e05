//! Card slots and the per-card spin animation
//!
//! A card moves idle → spinning → revealed. While spinning it churns through
//! random decoys from its pool, showing decoy names only for the last few
//! ticks, then settles on the item chosen for the roll.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSource;
use crate::constants::STRATAGEM_SLOTS;
use crate::data::Item;
use crate::pacing::RollPacing;
use crate::select::pick_one;
use crate::{CardView, Clock};

/// Presentation state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardState {
    #[default]
    Idle,
    Spinning,
    Revealed,
}

/// One of the seven card positions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSlot {
    Primary,
    Secondary,
    Grenade,
    Stratagem(u8),
}

impl CardSlot {
    pub const ALL: [Self; 7] = [
        Self::Primary,
        Self::Secondary,
        Self::Grenade,
        Self::Stratagem(0),
        Self::Stratagem(1),
        Self::Stratagem(2),
        Self::Stratagem(3),
    ];

    /// Element id prefix shared by the card's image, label and container.
    #[must_use]
    pub fn stem(self) -> String {
        match self {
            Self::Primary => "primary".to_string(),
            Self::Secondary => "secondary".to_string(),
            Self::Grenade => "grenade".to_string(),
            Self::Stratagem(i) => format!("stratagem-{i}"),
        }
    }

    #[must_use]
    pub fn image_id(self) -> String {
        self.element_id("img")
    }

    #[must_use]
    pub fn label_id(self) -> String {
        self.element_id("name")
    }

    #[must_use]
    pub fn container_id(self) -> String {
        self.element_id("card")
    }

    /// Spin duration for this slot under `pacing`.
    #[must_use]
    pub fn duration_ms(self, pacing: &RollPacing) -> u32 {
        match self {
            Self::Primary => pacing.primary_ms,
            Self::Secondary => pacing.secondary_ms,
            Self::Grenade => pacing.grenade_ms,
            Self::Stratagem(i) => pacing.stratagem_ms(usize::from(i)),
        }
    }

    /// Stratagem ids carry the index after the role: `stratagem-img-2`.
    fn element_id(self, part: &str) -> String {
        match self {
            Self::Stratagem(i) => format!("stratagem-{part}-{i}"),
            _ => format!("{}-{part}", self.stem()),
        }
    }
}

/// The seven card views, bound once at startup.
#[derive(Debug, Clone)]
pub struct CardDeck<V> {
    pub primary: V,
    pub secondary: V,
    pub grenade: V,
    pub stratagems: [V; STRATAGEM_SLOTS],
}

impl<V> CardDeck<V> {
    /// Build a deck by binding one view per slot.
    pub fn bind(mut bind: impl FnMut(CardSlot) -> V) -> Self {
        Self {
            primary: bind(CardSlot::Primary),
            secondary: bind(CardSlot::Secondary),
            grenade: bind(CardSlot::Grenade),
            stratagems: [
                bind(CardSlot::Stratagem(0)),
                bind(CardSlot::Stratagem(1)),
                bind(CardSlot::Stratagem(2)),
                bind(CardSlot::Stratagem(3)),
            ],
        }
    }

    /// Like [`CardDeck::bind`], stopping at the first slot that fails.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `bind`.
    pub fn try_bind<E>(mut bind: impl FnMut(CardSlot) -> Result<V, E>) -> Result<Self, E> {
        Ok(Self {
            primary: bind(CardSlot::Primary)?,
            secondary: bind(CardSlot::Secondary)?,
            grenade: bind(CardSlot::Grenade)?,
            stratagems: [
                bind(CardSlot::Stratagem(0))?,
                bind(CardSlot::Stratagem(1))?,
                bind(CardSlot::Stratagem(2))?,
                bind(CardSlot::Stratagem(3))?,
            ],
        })
    }

    #[must_use]
    pub fn get(&self, slot: CardSlot) -> Option<&V> {
        match slot {
            CardSlot::Primary => Some(&self.primary),
            CardSlot::Secondary => Some(&self.secondary),
            CardSlot::Grenade => Some(&self.grenade),
            CardSlot::Stratagem(i) => self.stratagems.get(usize::from(i)),
        }
    }

    /// Every view in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        [&self.primary, &self.secondary, &self.grenade]
            .into_iter()
            .chain(self.stratagems.iter())
    }
}

/// Put a card back in its idle presentation. Safe to repeat.
pub fn reset_card<V: CardView + ?Sized>(view: &V) {
    view.set_state(CardState::Idle);
}

/// Everything a card animation needs besides its own pool and result.
pub struct SpinContext<'a, K> {
    pub clock: &'a K,
    pub pacing: &'a RollPacing,
    pub source: &'a CatalogSource,
}

impl<K> Clone for SpinContext<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SpinContext<'_, K> {}

/// Spin `view` through decoys from `pool` for `duration_ms`, then reveal
/// `final_item`.
pub async fn animate_card<V, K, R>(
    view: &V,
    pool: &[Item],
    final_item: &Item,
    duration_ms: u32,
    ctx: SpinContext<'_, K>,
    rng: &mut R,
) where
    V: CardView + ?Sized,
    K: Clock,
    R: Rng,
{
    view.set_state(CardState::Spinning);

    let ticks = ctx.pacing.ticks_for(duration_ms);
    let reveal_from = ticks.saturating_sub(ctx.pacing.name_reveal_ticks);
    for tick in 0..ticks {
        if let Some(decoy) = pick_one(pool, rng) {
            view.set_image(&ctx.source.asset_url(&decoy.icon));
            if tick >= reveal_from {
                view.set_label(&decoy.label());
            }
        }
        ctx.clock.sleep(ctx.pacing.tick_ms).await;
    }

    view.set_image(&ctx.source.asset_url(&final_item.icon));
    view.set_label(&final_item.label());
    view.set_state(CardState::Revealed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use crate::headless::{RecordingCard, ViewEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool() -> Vec<Item> {
        vec![
            Item::new("Liberator", "img/liberator.png"),
            Item::new("Breaker", "img/breaker.png"),
            Item::new("Sickle", "img/sickle.png"),
        ]
    }

    #[test]
    fn slot_ids_match_page_markup() {
        assert_eq!(CardSlot::Primary.image_id(), "primary-img");
        assert_eq!(CardSlot::Grenade.label_id(), "grenade-name");
        assert_eq!(CardSlot::Secondary.container_id(), "secondary-card");
        assert_eq!(CardSlot::Stratagem(2).image_id(), "stratagem-img-2");
        assert_eq!(CardSlot::Stratagem(3).container_id(), "stratagem-card-3");
        assert_eq!(CardSlot::Stratagem(0).stem(), "stratagem-0");
    }

    #[test]
    fn slot_durations_follow_pacing() {
        let pacing = RollPacing::default();
        let durations: Vec<u32> = CardSlot::ALL
            .iter()
            .map(|slot| slot.duration_ms(&pacing))
            .collect();
        assert_eq!(durations, vec![1_500, 1_700, 1_900, 2_100, 2_300, 2_500, 2_700]);
    }

    #[test]
    fn deck_binds_every_slot_in_order() {
        let deck = CardDeck::bind(|slot| slot);
        let slots: Vec<CardSlot> = deck.iter().copied().collect();
        assert_eq!(slots, CardSlot::ALL.to_vec());
        assert_eq!(deck.get(CardSlot::Stratagem(1)), Some(&CardSlot::Stratagem(1)));
        assert_eq!(deck.get(CardSlot::Stratagem(9)), None);
    }

    #[test]
    fn try_bind_stops_at_first_missing_slot() {
        let mut seen = Vec::new();
        let result = CardDeck::try_bind(|slot| {
            seen.push(slot);
            if slot == CardSlot::Grenade {
                Err(slot.container_id())
            } else {
                Ok(slot)
            }
        });
        assert_eq!(result.err().as_deref(), Some("grenade-card"));
        assert_eq!(seen.len(), 3);

        let deck: Result<CardDeck<CardSlot>, ()> = CardDeck::try_bind(Ok);
        assert!(deck.is_ok());
    }

    #[test]
    fn animation_spins_then_reveals_final_item() {
        let clock = VirtualClock::new();
        let pacing = RollPacing::default();
        let source = CatalogSource::with_base_url("https://cdn.test/");
        let card = RecordingCard::new(CardSlot::Primary);
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let ctx = SpinContext {
            clock: &clock,
            pacing: &pacing,
            source: &source,
        };

        clock
            .run(animate_card(&card, &pool, &pool[1], 1_500, ctx, &mut rng))
            .unwrap();

        assert_eq!(clock.now(), 1_500);
        assert_eq!(card.state(), CardState::Revealed);
        assert_eq!(card.label(), "BREAKER");
        assert_eq!(card.image(), "https://cdn.test/img/breaker.png");

        let events = card.events();
        assert_eq!(events.first(), Some(&ViewEvent::State(CardState::Spinning)));
        assert_eq!(events.last(), Some(&ViewEvent::State(CardState::Revealed)));
    }

    #[test]
    fn decoy_names_only_show_for_the_last_ticks() {
        let clock = VirtualClock::new();
        let pacing = RollPacing::default();
        let source = CatalogSource::default();
        let card = RecordingCard::new(CardSlot::Secondary);
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let ctx = SpinContext {
            clock: &clock,
            pacing: &pacing,
            source: &source,
        };

        clock
            .run(animate_card(&card, &pool, &pool[0], 1_700, ctx, &mut rng))
            .unwrap();

        let events = card.events();
        let images = events
            .iter()
            .filter(|e| matches!(e, ViewEvent::Image(_)))
            .count();
        let labels = events
            .iter()
            .filter(|e| matches!(e, ViewEvent::Label(_)))
            .count();
        // 28 decoy ticks plus the final reveal.
        assert_eq!(images, 29);
        assert_eq!(labels, 5);
        assert_eq!(clock.sleeps(), 28);
    }

    #[test]
    fn short_duration_reveals_without_spinning() {
        let clock = VirtualClock::new();
        let pacing = RollPacing::default();
        let source = CatalogSource::default();
        let card = RecordingCard::new(CardSlot::Grenade);
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ctx = SpinContext {
            clock: &clock,
            pacing: &pacing,
            source: &source,
        };

        clock
            .run(animate_card(&card, &pool, &pool[2], 30, ctx, &mut rng))
            .unwrap();
        assert_eq!(clock.now(), 0);
        assert_eq!(card.label(), "SICKLE");
        assert_eq!(card.state(), CardState::Revealed);
    }

    #[test]
    fn reset_is_idempotent() {
        let card = RecordingCard::new(CardSlot::Stratagem(0));
        card.set_state(CardState::Revealed);
        reset_card(&card);
        let once = card.snapshot();
        reset_card(&card);
        assert_eq!(card.snapshot(), once);
        assert_eq!(card.state(), CardState::Idle);
    }
}
