use std::collections::HashSet;

use futures::future::join;
use loadout_core::headless::{
    CardSnapshot, RecordingAudio, RecordingCard, RecordingTrigger, StaticTransport,
};
use loadout_core::{
    CardDeck, CardSlot, CardState, Catalog, CatalogError, CatalogSource, Clock, Cue, Item,
    Roller, TriggerLabel, VirtualClock,
};

type TestRoller = Roller<RecordingCard, RecordingTrigger, RecordingAudio, VirtualClock>;

const BASE: &str = "https://db.test/";

fn roller_with_audio(seed: u64, audio: RecordingAudio) -> TestRoller {
    Roller::new(
        CardDeck::bind(RecordingCard::new),
        RecordingTrigger::new(),
        audio,
        VirtualClock::new(),
        seed,
    )
    .with_source(CatalogSource::with_base_url(BASE))
}

fn roller(seed: u64) -> TestRoller {
    roller_with_audio(seed, RecordingAudio::new())
}

fn items(prefix: &str, count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(format!("{prefix} {i}"), format!("img/{prefix}-{i}.png")))
        .collect()
}

/// One primary, one secondary, one grenade and six stratagems.
fn small_catalog() -> Catalog {
    Catalog {
        primaries: vec![Item::new("Liberator", "img/liberator.png")],
        secondaries: vec![Item::new("Peacemaker", "img/peacemaker.png")],
        grenades: vec![Item::new("Frag", "img/frag.png")],
        stratagems: items("Stratagem", 6),
    }
}

fn snapshots(roller: &TestRoller) -> Vec<CardSnapshot> {
    roller.cards().iter().map(RecordingCard::snapshot).collect()
}

#[test]
fn full_roll_reveals_every_card() -> anyhow::Result<()> {
    let roller = roller(42);
    roller.install_catalog(small_catalog());

    let outcome = roller
        .clock()
        .run(roller.handle_roll())?
        .expect("roll should run once the catalog is installed");

    let cards = roller.cards();
    assert_eq!(cards.primary.label(), "LIBERATOR");
    assert_eq!(cards.primary.image(), "https://db.test/img/liberator.png");
    assert_eq!(cards.secondary.label(), "PEACEMAKER");
    assert_eq!(cards.grenade.label(), "FRAG");

    let catalog = roller.catalog();
    let mut shown = HashSet::new();
    for card in &cards.stratagems {
        assert_eq!(card.state(), CardState::Revealed);
        let label = card.label();
        assert!(
            catalog.stratagems.iter().any(|s| s.label() == label),
            "{label} is not in the pool"
        );
        shown.insert(label);
    }
    assert_eq!(shown.len(), 4, "stratagem cards repeated an item");

    for (slot, item) in outcome.selections.assignments() {
        let card = cards.get(slot).expect("every slot is bound");
        assert_eq!(card.label(), item.label());
    }

    assert!(roller.trigger().is_enabled());
    assert_eq!(roller.trigger().label(), TriggerLabel::Again);
    assert!(!roller.is_rolling());
    assert_eq!(roller.rolls(), 1);
    Ok(())
}

#[test]
fn roll_sequence_orders_trigger_audio_and_reset() -> anyhow::Result<()> {
    let roller = roller(7);
    roller.install_catalog(small_catalog());
    roller.clock().run(roller.handle_roll())?;

    assert_eq!(
        roller.trigger().history(),
        vec![TriggerLabel::Ready, TriggerLabel::Working, TriggerLabel::Again]
    );
    assert_eq!(roller.audio().played(), vec![Cue::Deploy, Cue::Success]);

    for card in roller.cards().iter() {
        let states: Vec<CardState> = card
            .events()
            .into_iter()
            .filter_map(|event| match event {
                loadout_core::headless::ViewEvent::State(state) => Some(state),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![CardState::Idle, CardState::Spinning, CardState::Revealed],
            "{:?}",
            card.slot()
        );
    }
    Ok(())
}

#[test]
fn roll_takes_settle_delay_plus_longest_spin() -> anyhow::Result<()> {
    let roller = roller(3);
    roller.install_catalog(small_catalog());
    roller.clock().run(roller.handle_roll())?;
    assert_eq!(roller.clock().now(), 2_800);
    Ok(())
}

#[test]
fn roll_ignored_while_another_is_running() -> anyhow::Result<()> {
    let roller = roller(11);
    roller.install_catalog(small_catalog());
    let clock = roller.clock();

    let (first, second) = clock.run(join(roller.handle_roll(), async {
        clock.sleep(500).await;
        assert!(roller.is_rolling());
        roller.handle_roll().await
    }))?;

    assert!(first.is_some());
    assert!(second.is_none());
    for card in roller.cards().iter() {
        assert_eq!(card.entered(CardState::Spinning), 1, "{:?}", card.slot());
    }
    assert_eq!(roller.audio().played(), vec![Cue::Deploy, Cue::Success]);
    assert_eq!(roller.rolls(), 1);
    Ok(())
}

#[test]
fn roll_before_load_changes_nothing() -> anyhow::Result<()> {
    let roller = roller(1);
    let before = snapshots(&roller);

    let outcome = roller.clock().run(roller.handle_roll())?;

    assert!(outcome.is_none());
    assert_eq!(snapshots(&roller), before);
    assert!(roller.trigger().history().is_empty());
    assert!(roller.audio().played().is_empty());
    assert!(roller.cards().iter().all(|card| card.events().is_empty()));
    assert_eq!(roller.clock().now(), 0);
    Ok(())
}

#[test]
fn failed_fetch_leaves_trigger_disabled_with_error() -> anyhow::Result<()> {
    let roller = roller(5);
    let transport = StaticTransport::new()
        .with_ok("https://db.test/data/weapons/primary.json", "[]")
        .with_status("https://db.test/data/weapons/secondary.json", 404, "")
        .with_ok("https://db.test/data/weapons/grenades.json", "[]")
        .with_ok("https://db.test/data/stratagems/list.json", "{}");

    let result = roller.clock().run(roller.load(&transport))?;

    assert!(matches!(result, Err(CatalogError::Fetch { status: 404, .. })));
    assert!(!roller.trigger().is_enabled());
    assert_eq!(roller.trigger().label(), TriggerLabel::Error);
    assert_eq!(roller.catalog().counts(), [0, 0, 0, 0]);
    assert!(roller.clock().run(roller.handle_roll())?.is_none());
    Ok(())
}

#[test]
fn reset_twice_matches_reset_once() {
    let roller = roller(9);
    roller.install_catalog(small_catalog());
    roller.reset_cards();
    let once = snapshots(&roller);
    roller.reset_cards();
    assert_eq!(snapshots(&roller), once);
    assert!(
        roller
            .cards()
            .iter()
            .all(|card| card.state() == CardState::Idle)
    );
}

#[test]
fn rejected_audio_does_not_block_the_roll() -> anyhow::Result<()> {
    let roller = roller_with_audio(13, RecordingAudio::rejecting());
    roller.install_catalog(small_catalog());
    let outcome = roller.clock().run(roller.handle_roll())?;
    assert!(outcome.is_some());
    assert_eq!(roller.audio().played(), vec![Cue::Deploy, Cue::Success]);
    assert_eq!(roller.trigger().label(), TriggerLabel::Again);
    Ok(())
}

#[test]
fn stratagems_never_repeat_across_seeds() -> anyhow::Result<()> {
    let mut catalog = small_catalog();
    catalog.stratagems = items("Stratagem", 4);
    for seed in 0..64 {
        let roller = roller(seed);
        roller.install_catalog(catalog.clone());
        let outcome = roller
            .clock()
            .run(roller.handle_roll())?
            .expect("roll runs");
        let distinct: HashSet<&Item> = outcome.selections.stratagems.iter().collect();
        assert_eq!(distinct.len(), 4, "seed {seed}");
    }
    Ok(())
}

#[test]
fn short_stratagem_pool_leaves_extra_cards_idle() -> anyhow::Result<()> {
    let mut catalog = small_catalog();
    catalog.stratagems = items("Stratagem", 2);
    let roller = roller(21);
    roller.install_catalog(catalog);

    let outcome = roller
        .clock()
        .run(roller.handle_roll())?
        .expect("roll runs");

    assert_eq!(outcome.selections.stratagems.len(), 2);
    let cards = roller.cards();
    assert_eq!(cards.stratagems[0].state(), CardState::Revealed);
    assert_eq!(cards.stratagems[1].state(), CardState::Revealed);
    assert_eq!(cards.stratagems[2].state(), CardState::Idle);
    assert_eq!(cards.stratagems[3].state(), CardState::Idle);
    assert_eq!(roller.trigger().label(), TriggerLabel::Again);
    Ok(())
}

#[test]
fn same_seed_draws_same_loadout() -> anyhow::Result<()> {
    let mut catalog = small_catalog();
    catalog.primaries = items("Primary", 8);
    catalog.stratagems = items("Stratagem", 20);

    let draw = |seed| -> anyhow::Result<_> {
        let roller = roller(seed);
        roller.install_catalog(catalog.clone());
        Ok(roller.clock().run(roller.handle_roll())?)
    };

    assert_eq!(draw(99)?, draw(99)?);
    Ok(())
}

#[test]
fn consecutive_rolls_count_up() -> anyhow::Result<()> {
    let roller = roller(17);
    roller.install_catalog(small_catalog());
    let clock = roller.clock();
    let first = clock.run(roller.handle_roll())?.expect("first roll");
    let second = clock.run(roller.handle_roll())?.expect("second roll");
    assert_eq!(first.roll, 1);
    assert_eq!(second.roll, 2);
    assert_eq!(clock.now(), 5_600);
    assert_eq!(
        roller
            .cards()
            .get(CardSlot::Stratagem(3))
            .map(RecordingCard::state),
        Some(CardState::Revealed)
    );
    Ok(())
}
