use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::PageProbe;

pub mod contact;
pub mod flows;
pub mod smoke;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub probe: PageProbe<'a>,
    pub verbose: bool,
}

// Logic test scenario
#[derive(Debug, Clone, Copy)]
pub struct TestScenario {
    pub name: &'static str,
    pub title: &'static str,
    pub run: fn() -> Result<()>,
}

impl TestScenario {
    #[must_use]
    pub const fn new(name: &'static str, title: &'static str, run: fn() -> Result<()>) -> Self {
        Self { name, title, run }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// A core flow with no browser counterpart.
#[derive(Clone, Copy)]
pub struct FlowScenario(TestScenario);

#[async_trait::async_trait]
impl BrowserScenario for FlowScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("{} has no browser run", self.0.name)
    }
}

impl CombinedScenario for FlowScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(self.0)
    }
}

/// Scenario keys in the order `all` expands to.
pub const ALL_SCENARIOS: [&str; 8] = [
    "smoke",
    "contact-boundaries",
    "register-duplicate",
    "register-new",
    "login-unauthorized",
    "session-logout",
    "rating-once",
    "catalog-join",
];

/// Whether `name` has a browser run.
pub fn runs_in_browser(name: &str) -> bool {
    matches!(name, "smoke" | "contact-boundaries")
}

fn flow(scenario: TestScenario) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    Some(Box::new(FlowScenario(scenario)))
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "contact-boundaries" | "contact" => Some(Box::new(contact::ContactBoundariesScenario)),
        "register-duplicate" => flow(flows::REGISTER_DUPLICATE),
        "register-new" => flow(flows::REGISTER_NEW),
        "login-unauthorized" => flow(flows::LOGIN_UNAUTHORIZED),
        "session-logout" | "logout" => flow(flows::SESSION_LOGOUT),
        "rating-once" | "rating" => flow(flows::RATING_ONCE),
        "catalog-join" | "catalogs" => flow(flows::CATALOG_JOIN),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", smoke::TITLE),
        ("contact-boundaries", contact::TITLE),
        ("register-duplicate", flows::REGISTER_DUPLICATE.title),
        ("register-new", flows::REGISTER_NEW.title),
        ("login-unauthorized", flows::LOGIN_UNAUTHORIZED.title),
        ("session-logout", flows::SESSION_LOGOUT.title),
        ("rating-once", flows::RATING_ONCE.title),
        ("catalog-join", flows::CATALOG_JOIN.title),
        ("all", "Every scenario above"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for name in ALL_SCENARIOS {
            let scenario = get_scenario(name).unwrap_or_else(|| panic!("{name} missing"));
            let logic = scenario.as_logic_scenario().expect("logic run");
            assert_eq!(logic.name, name);
        }
        assert!(get_scenario("weather").is_none());
    }

    #[test]
    fn aliases_resolve_to_the_same_scenario() {
        let logic = get_scenario("RATING")
            .and_then(|s| s.as_logic_scenario())
            .expect("alias");
        assert_eq!(logic.name, "rating-once");
    }

    #[test]
    fn every_logic_scenario_passes_against_the_in_memory_backend() {
        for name in ALL_SCENARIOS {
            let logic = get_scenario(name)
                .and_then(|s| s.as_logic_scenario())
                .expect("logic run");
            if let Err(err) = (logic.run)() {
                panic!("{name} failed: {err:#}");
            }
        }
    }

    #[test]
    fn listing_covers_all_keys() {
        let listed: Vec<_> = list_scenarios().into_iter().map(|(key, _)| key).collect();
        for name in ALL_SCENARIOS {
            assert!(listed.contains(&name));
        }
        assert!(runs_in_browser("contact-boundaries"));
        assert!(!runs_in_browser("rating-once"));
    }
}
