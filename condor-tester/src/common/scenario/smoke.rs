use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use crate::logic::Fixture;
use condor_core::error::{CONNECTION_MESSAGE, status_message};
use condor_core::{ApiConfig, ApiError, Backend, KnownUsers, RoleFlags};

pub const TITLE: &str = "Smoke Test";

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let probe = &ctx.probe;
        probe.open(&ctx.base_url, "/").await?;

        probe.find("a[href='#main']").await?;
        probe.find("main#main[role='main']").await?;
        probe.find("footer").await?;
        // A fresh browser has no session, so only the public links are offered.
        probe.find("nav a[href='/login']").await?;
        probe.assert_absent("nav a[href='/admin']").await?;

        if ctx.verbose {
            println!("  🌐 Landmarks and navigation rendered");
        }
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("smoke", TITLE, smoke))
    }
}

fn smoke() -> Result<()> {
    let config = ApiConfig::from_env();
    for backend in Backend::ALL {
        let base = config.base_url(backend);
        ensure!(!base.is_empty(), "{} has no base URL", backend.label());
        ensure!(
            !base.ends_with('/'),
            "{} base URL keeps a trailing slash: {base}",
            backend.label()
        );
    }

    let fixture = Fixture::new();
    let session = &fixture.services.session;
    ensure!(!session.is_session_active(), "fresh store should have no session");
    ensure!(
        session.role_flags() == RoleFlags::NONE,
        "fresh store should grant no role"
    );
    ensure!(
        KnownUsers::new(fixture.store.as_ref()).all().is_empty(),
        "fresh store should know no users"
    );

    for status in [400, 401, 403, 404, 409, 422, 500, 503, 418] {
        let message = ApiError::http(status, "").user_message();
        ensure!(!message.is_empty(), "HTTP {status} produced an empty message");
        if let Some(expected) = status_message(status) {
            ensure!(message == expected, "HTTP {status}: got {message:?}");
        }
    }
    let offline = ApiError::Transport("connection refused".into()).user_message();
    ensure!(
        offline == CONNECTION_MESSAGE,
        "transport failure copy changed: {offline:?}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_scenario_exposes_logic_run() {
        let logic = SmokeScenario.as_logic_scenario().expect("logic scenario");
        assert_eq!(logic.name, "smoke");
        assert_eq!(logic.title, TITLE);
    }

    #[test]
    fn smoke_passes_on_a_fresh_fixture() {
        smoke().expect("smoke");
    }
}
