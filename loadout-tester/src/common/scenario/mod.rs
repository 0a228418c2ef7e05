use anyhow::Result;
use loadout_core::{Catalog, CatalogSource, RollPacing};

pub mod load;
pub mod roll;
pub mod smoke;

/// Everything a scenario sees for one seed.
#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub catalog: &'a Catalog,
    pub source: &'a CatalogSource,
    pub pacing: RollPacing,
    pub seed: u64,
    pub verbose: bool,
}

pub type ScenarioFn = fn(&ScenarioCtx<'_>) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

const SCENARIOS: &[TestScenario] = &[
    smoke::SMOKE,
    roll::UNIQUE_STRATAGEMS,
    roll::REENTRANCY_GUARD,
    roll::PACING,
    roll::SHORT_POOL,
    roll::AUDIO_BLOCKED,
    load::CATALOG_MIRROR,
    load::LOAD_FAILURE,
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    SCENARIOS.iter().copied().find(|s| s.name == name)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.name, s.description)).collect()
}

pub fn scenario_names() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::fs_transport::FsTransport;
    use loadout_core::load_catalog;

    #[test]
    fn names_are_unique_and_resolvable() {
        let names = scenario_names();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
        for name in &names {
            assert!(get_scenario(name).is_some(), "{name}");
        }
        assert!(get_scenario("nope").is_none());
    }

    #[tokio::test]
    async fn every_scenario_passes_on_bundled_catalog() {
        let transport = FsTransport::bundled();
        let source = transport.source();
        let catalog = load_catalog(&transport, &source).await.unwrap();
        for scenario in SCENARIOS {
            for seed in [1, 42, 1337] {
                let ctx = ScenarioCtx {
                    catalog: &catalog,
                    source: &source,
                    pacing: RollPacing::default(),
                    seed,
                    verbose: false,
                };
                if let Err(err) = (scenario.run)(&ctx) {
                    panic!("{} seed {seed}: {err:#}", scenario.name);
                }
            }
        }
    }
}
