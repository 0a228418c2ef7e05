use std::collections::HashSet;

use anyhow::{Context, Result, ensure};
use futures::future::join;
use loadout_core::headless::RecordingAudio;
use loadout_core::constants::STRATAGEM_SLOTS;
use loadout_core::{CardState, Clock, Cue, TriggerLabel};

use super::{ScenarioCtx, TestScenario};
use crate::logic::harness::{expected_roll_ms, headless_roller, ready_roller, roll};

pub const UNIQUE_STRATAGEMS: TestScenario = TestScenario {
    name: "unique-stratagems",
    description: "Stratagem cards never repeat within a roll",
    run: unique_stratagems,
};

pub const REENTRANCY_GUARD: TestScenario = TestScenario {
    name: "reentrancy-guard",
    description: "A second roll request during a roll is ignored",
    run: reentrancy_guard,
};

pub const PACING: TestScenario = TestScenario {
    name: "pacing",
    description: "A roll lasts the settle delay plus the longest card spin",
    run: pacing,
};

pub const SHORT_POOL: TestScenario = TestScenario {
    name: "short-pool",
    description: "Fewer than four stratagems leaves the extra cards idle",
    run: short_pool,
};

pub const AUDIO_BLOCKED: TestScenario = TestScenario {
    name: "audio-blocked",
    description: "Rejected sound playback does not interrupt a roll",
    run: audio_blocked,
};

const ROLLS_PER_SEED: usize = 3;

fn unique_stratagems(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let roller = ready_roller(ctx);
    let expected = ctx.catalog.stratagems.len().min(STRATAGEM_SLOTS);
    for _ in 0..ROLLS_PER_SEED {
        let outcome = roll(&roller)?;
        let drawn = &outcome.selections.stratagems;
        ensure!(
            drawn.len() == expected,
            "roll {} drew {} stratagems, expected {expected}",
            outcome.roll,
            drawn.len()
        );
        let distinct: HashSet<_> = drawn.iter().collect();
        ensure!(
            distinct.len() == drawn.len(),
            "roll {} repeated a stratagem: {:?}",
            outcome.roll,
            drawn.iter().map(|s| &s.name).collect::<Vec<_>>()
        );
        for item in drawn {
            ensure!(
                ctx.catalog.stratagems.contains(item),
                "{} is not in the catalog",
                item.name
            );
        }
    }
    Ok(())
}

fn reentrancy_guard(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let roller = ready_roller(ctx);
    let clock = roller.clock();
    let midway = ctx.pacing.reset_settle_ms.saturating_add(ctx.pacing.primary_ms / 2);

    let (first, second) = clock
        .run(join(roller.handle_roll(), async {
            clock.sleep(midway).await;
            (roller.is_rolling(), roller.handle_roll().await)
        }))
        .context("rolls never finished")?;

    let (was_rolling, second) = second;
    ensure!(was_rolling, "roll finished before {midway} ms");
    ensure!(first.is_some(), "first roll was refused");
    ensure!(second.is_none(), "second roll ran during the first");
    for card in roller.cards().iter() {
        let spins = card.entered(CardState::Spinning);
        ensure!(spins <= 1, "{:?} spun {spins} times", card.slot());
    }
    ensure!(
        roller.audio().played() == [Cue::Deploy, Cue::Success],
        "cues played {:?}",
        roller.audio().played()
    );
    ensure!(roller.rolls() == 1, "{} rolls counted", roller.rolls());
    Ok(())
}

fn pacing(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let roller = ready_roller(ctx);
    let outcome = roll(&roller)?;
    let expected = expected_roll_ms(&ctx.pacing, &outcome);
    let elapsed = roller.clock().now();
    ensure!(
        elapsed == expected,
        "roll took {elapsed} ms of virtual time, expected {expected} ms"
    );
    Ok(())
}

fn short_pool(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut catalog = ctx.catalog.clone();
    catalog.stratagems.truncate(2);
    let kept = catalog.stratagems.len();
    let short_ctx = ScenarioCtx {
        catalog: &catalog,
        ..ctx.clone()
    };

    let roller = ready_roller(&short_ctx);
    let outcome = roll(&roller)?;
    ensure!(
        outcome.selections.stratagems.len() == kept,
        "drew {} stratagems from a pool of {kept}",
        outcome.selections.stratagems.len()
    );
    for (index, card) in roller.cards().stratagems.iter().enumerate() {
        let expected = if index < kept {
            CardState::Revealed
        } else {
            CardState::Idle
        };
        ensure!(
            card.state() == expected,
            "stratagem card {index} is {:?}, expected {expected:?}",
            card.state()
        );
    }
    ensure!(
        roller.trigger().label() == TriggerLabel::Again,
        "trigger shows {:?}",
        roller.trigger().label()
    );
    Ok(())
}

fn audio_blocked(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let roller = headless_roller(ctx, RecordingAudio::rejecting());
    roller.install_catalog(ctx.catalog.clone());
    roll(&roller)?;
    ensure!(
        roller.audio().played() == [Cue::Deploy, Cue::Success],
        "cues requested {:?}",
        roller.audio().played()
    );
    ensure!(roller.trigger().is_enabled(), "trigger left disabled");
    Ok(())
}
