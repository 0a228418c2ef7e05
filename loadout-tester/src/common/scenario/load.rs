use anyhow::{Context, Result, bail, ensure};
use loadout_core::headless::RecordingAudio;
use loadout_core::{CatalogError, CatalogResource, TriggerLabel};

use super::{ScenarioCtx, TestScenario};
use crate::logic::harness::{HeadlessRoller, headless_roller, mirror_transport};

pub const CATALOG_MIRROR: TestScenario = TestScenario {
    name: "catalog-mirror",
    description: "Loading through the roller installs the catalog and arms the trigger",
    run: catalog_mirror,
};

pub const LOAD_FAILURE: TestScenario = TestScenario {
    name: "load-failure",
    description: "Any failed or malformed document leaves the trigger disabled",
    run: load_failure,
};

fn catalog_mirror(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let roller = headless_roller(ctx, RecordingAudio::new());
    let transport = mirror_transport(ctx.source, ctx.catalog)?;
    roller
        .clock()
        .run(roller.load(&transport))
        .context("load never finished")?
        .context("mirror load failed")?;

    ensure!(
        *roller.catalog() == *ctx.catalog,
        "installed catalog differs from the source"
    );
    ensure!(roller.trigger().is_enabled(), "trigger left disabled");
    ensure!(
        roller.trigger().history() == [TriggerLabel::Loading, TriggerLabel::Ready],
        "trigger went through {:?}",
        roller.trigger().history()
    );
    Ok(())
}

fn load_failure(ctx: &ScenarioCtx<'_>) -> Result<()> {
    for resource in CatalogResource::ALL {
        let url = ctx.source.url(resource);

        let transport = mirror_transport(ctx.source, ctx.catalog)?.with_status(&url, 503, "");
        let roller = headless_roller(ctx, RecordingAudio::new());
        match roller.clock().run(roller.load(&transport))? {
            Err(CatalogError::Fetch { status: 503, .. }) => {}
            other => bail!("{} with 503: expected fetch failure, got {other:?}", resource.key()),
        }
        expect_locked(&roller, resource)?;

        let transport = mirror_transport(ctx.source, ctx.catalog)?.with_ok(&url, "{ broken");
        let roller = headless_roller(ctx, RecordingAudio::new());
        match roller.clock().run(roller.load(&transport))? {
            Err(CatalogError::Parse { .. }) => {}
            other => bail!("{} malformed: expected parse failure, got {other:?}", resource.key()),
        }
        expect_locked(&roller, resource)?;
    }
    Ok(())
}

fn expect_locked(roller: &HeadlessRoller, resource: CatalogResource) -> Result<()> {
    let trigger = roller.trigger();
    ensure!(
        !trigger.is_enabled(),
        "{}: trigger enabled after failure",
        resource.key()
    );
    ensure!(
        trigger.label() == TriggerLabel::Error,
        "{}: trigger shows {:?}",
        resource.key(),
        trigger.label()
    );
    ensure!(
        !roller.catalog().is_loaded(),
        "{}: catalog installed despite failure",
        resource.key()
    );
    let refused = roller.clock().run(roller.handle_roll())?;
    ensure!(
        refused.is_none(),
        "{}: roll ran without a catalog",
        resource.key()
    );
    Ok(())
}
