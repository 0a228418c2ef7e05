use anyhow::{Context, Result, ensure};
use loadout_core::{CardState, Cue, TriggerLabel};

use super::{ScenarioCtx, TestScenario};
use crate::logic::harness::{ready_roller, roll};

pub const SMOKE: TestScenario = TestScenario {
    name: "smoke",
    description: "One roll reveals every card with its drawn item",
    run,
};

fn run(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let roller = ready_roller(ctx);
    let outcome = roll(&roller)?;

    for (slot, item) in outcome.selections.assignments() {
        let card = roller
            .cards()
            .get(slot)
            .with_context(|| format!("no card bound for {slot:?}"))?;
        ensure!(
            card.state() == CardState::Revealed,
            "{slot:?} ended {:?}",
            card.state()
        );
        ensure!(
            card.label() == item.label(),
            "{slot:?} shows {} instead of {}",
            card.label(),
            item.label()
        );
        let expected_image = ctx.source.asset_url(&item.icon);
        ensure!(
            card.image() == expected_image,
            "{slot:?} image {} instead of {expected_image}",
            card.image()
        );
    }

    let trigger = roller.trigger();
    ensure!(trigger.is_enabled(), "trigger left disabled");
    ensure!(
        trigger.label() == TriggerLabel::Again,
        "trigger shows {:?}",
        trigger.label()
    );
    ensure!(
        roller.audio().played() == [Cue::Deploy, Cue::Success],
        "cues played {:?}",
        roller.audio().played()
    );

    if ctx.verbose {
        println!(
            "  🎲 seed {}: {}",
            ctx.seed,
            outcome
                .selections
                .assignments()
                .iter()
                .map(|(_, item)| item.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}
