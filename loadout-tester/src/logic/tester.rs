use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::iteration_seed;
use crate::common::scenario::{ScenarioCtx, TestScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run `scenario` once per seed, `iterations` times each.
    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        base: &ScenarioCtx<'_>,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {})",
                        scenario.name.bright_white(),
                        seed
                    );
                }
                self.run_single_scenario(scenario, base, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        base: &ScenarioCtx<'_>,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::with_capacity(iterations);

        for i in 0..iterations {
            let ctx = ScenarioCtx {
                seed: iteration_seed(seed, i),
                verbose: self.verbose,
                ..base.clone()
            };
            let start_time = Instant::now();
            let outcome = (scenario.run)(&ctx);
            performance_data.push(start_time.elapsed());

            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    log::debug!("{} failed for seed {}: {err:#}", scenario.name, ctx.seed);
                    failures.push(format!(
                        "Iteration {} (seed {}): {err:#}",
                        i + 1,
                        ctx.seed
                    ));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(u32::MAX)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros: Vec<u128> = durations.iter().map(Duration::as_micros).collect();
        micros.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = Vec::<u128>::deserialize(deserializer)?;
        Ok(micros
            .into_iter()
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(u64::MAX)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use loadout_core::{Catalog, CatalogSource, RollPacing};

    fn odd_seeds_fail(ctx: &ScenarioCtx<'_>) -> anyhow::Result<()> {
        if ctx.seed % 2 == 1 {
            bail!("odd seed");
        }
        Ok(())
    }

    const PARITY: TestScenario = TestScenario {
        name: "parity",
        description: "fails on odd seeds",
        run: odd_seeds_fail,
    };

    #[test]
    fn iterations_advance_the_seed() {
        let catalog = Catalog::empty();
        let source = CatalogSource::default();
        let base = ScenarioCtx {
            catalog: &catalog,
            source: &source,
            pacing: RollPacing::default(),
            seed: 0,
            verbose: false,
        };
        let results = LogicTester::new(false).run_scenario(&PARITY, &base, &[10, 20], 4);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(!result.passed);
            assert_eq!(result.iterations_run, 4);
            assert_eq!(result.successful_iterations, 2);
            assert_eq!(result.failures.len(), 2);
            assert_eq!(result.performance_data.len(), 4);
        }
        assert!(results[0].failures[0].contains("seed 11"));
    }

    #[test]
    fn results_serialize_durations_as_micros() {
        let result = ScenarioResult {
            scenario_name: "smoke".to_string(),
            seed: 7,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(1_500),
            performance_data: vec![Duration::from_micros(1_500)],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 1_500);
        assert_eq!(json["performance_data"][0], 1_500);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.average_duration, result.average_duration);
    }
}
