use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;

pub const LOGIC_TARGET: &str = "logic";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    /// `logic` or the browser the scenario ran in.
    pub target: String,
    pub passed: bool,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScenarioResult {
    pub fn from_outcome(
        scenario_name: impl Into<String>,
        target: impl Into<String>,
        outcome: &anyhow::Result<()>,
        duration: Duration,
    ) -> Self {
        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => vec![format!("{err:#}")],
        };
        Self {
            scenario_name: scenario_name.into(),
            target: target.into(),
            passed: failures.is_empty(),
            failures,
            duration,
        }
    }
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(&self, scenario: &TestScenario) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.name.bright_white());
        }

        let start = Instant::now();
        let outcome = (scenario.run)();
        let result =
            ScenarioResult::from_outcome(scenario.name, LOGIC_TARGET, &outcome, start.elapsed());

        if self.verbose {
            match &outcome {
                Ok(()) => println!("  ✅ {} passed ({:?})", scenario.title, result.duration),
                Err(err) => println!(
                    "  ❌ {} failed: {}",
                    scenario.title,
                    format!("{err:#}").red()
                ),
            }
        }
        log::debug!("{} finished: passed={}", scenario.name, result.passed);
        result
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
