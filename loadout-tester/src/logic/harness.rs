//! Headless roller construction shared by the scenarios.
use anyhow::{Context, Result, bail};
use loadout_core::headless::{RecordingAudio, RecordingCard, RecordingTrigger, StaticTransport};
use loadout_core::{
    CardDeck, Catalog, CatalogResource, CatalogSource, RollOutcome, RollPacing, Roller,
    StratagemGroups, VirtualClock,
};

use crate::common::scenario::ScenarioCtx;

pub type HeadlessRoller = Roller<RecordingCard, RecordingTrigger, RecordingAudio, VirtualClock>;

/// A roller with recording views and no catalog yet.
pub fn headless_roller(ctx: &ScenarioCtx<'_>, audio: RecordingAudio) -> HeadlessRoller {
    Roller::new(
        CardDeck::bind(RecordingCard::new),
        RecordingTrigger::new(),
        audio,
        VirtualClock::new(),
        ctx.seed,
    )
    .with_pacing(ctx.pacing)
    .with_source(ctx.source.clone())
}

/// A roller with the scenario's catalog installed.
pub fn ready_roller(ctx: &ScenarioCtx<'_>) -> HeadlessRoller {
    let roller = headless_roller(ctx, RecordingAudio::new());
    roller.install_catalog(ctx.catalog.clone());
    roller
}

/// Run one roll to completion on the roller's virtual clock.
pub fn roll(roller: &HeadlessRoller) -> Result<RollOutcome> {
    let outcome = roller
        .clock()
        .run(roller.handle_roll())
        .context("roll never finished")?;
    match outcome {
        Some(outcome) => Ok(outcome),
        None => bail!("roll was refused"),
    }
}

/// Virtual time a roll should take for the slots it filled.
pub fn expected_roll_ms(pacing: &RollPacing, outcome: &RollOutcome) -> u64 {
    let longest = outcome
        .selections
        .assignments()
        .iter()
        .map(|(slot, _)| slot.duration_ms(pacing))
        .max()
        .unwrap_or(0);
    u64::from(pacing.reset_settle_ms) + u64::from(longest)
}

/// In-memory transport serving `catalog` in the published document shapes.
pub fn mirror_transport(source: &CatalogSource, catalog: &Catalog) -> Result<StaticTransport> {
    let mut transport = StaticTransport::new();
    for resource in CatalogResource::ALL {
        let body = match resource {
            CatalogResource::Primaries => serde_json::to_string(&catalog.primaries)?,
            CatalogResource::Secondaries => serde_json::to_string(&catalog.secondaries)?,
            CatalogResource::Grenades => serde_json::to_string(&catalog.grenades)?,
            CatalogResource::Stratagems => {
                let mut groups = StratagemGroups::new();
                groups.insert("Stratagems".to_string(), catalog.stratagems.clone());
                serde_json::to_string(&groups)?
            }
        };
        transport = transport.with_ok(source.url(resource), body);
    }
    Ok(transport)
}
