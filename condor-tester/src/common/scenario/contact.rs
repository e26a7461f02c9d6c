use anyhow::{Result, anyhow, ensure};
use futures::executor::block_on;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use crate::logic::Fixture;
use condor_core::forms::contact::{ContactField, ContactForm, MENSAJE_MAX, MENSAJE_MIN};
use condor_core::{FormError, Method};

pub const TITLE: &str = "Contact Message Boundaries";
const CONTACTO: &str = "/api/v1/contacto";
const TOO_LONG: &str = "300 caracteres";

pub struct ContactBoundariesScenario;

#[async_trait::async_trait]
impl BrowserScenario for ContactBoundariesScenario {
    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let probe = &ctx.probe;
        probe.open(&ctx.base_url, "/contacto").await?;

        probe
            .type_into("#mensaje", &"a".repeat(MENSAJE_MAX + 1))
            .await?;
        probe.settle().await;

        let error = probe.text("#mensaje-error").await?;
        ensure!(
            error.contains(TOO_LONG),
            "expected the length error, got {error:?}"
        );
        probe.find("p.form-text.text-danger").await?;
        probe
            .find("form.contact-form button[type='submit'][disabled]")
            .await?;

        if ctx.verbose {
            println!("  ✍️  Over-long message flagged: {error}");
        }
        Ok(())
    }
}

impl CombinedScenario for ContactBoundariesScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("contact-boundaries", TITLE, contact_boundaries))
    }
}

fn form_with(mensaje: &str) -> ContactForm {
    let mut form = ContactForm::default();
    form.set(ContactField::Nombre, "Ana".into());
    form.set(ContactField::Correo, "ana@condor.cl".into());
    form.set(ContactField::Mensaje, mensaje.into());
    form
}

fn contact_boundaries() -> Result<()> {
    let fixture = Fixture::new();
    fixture.mock.on(Method::Post, CONTACTO, 201, "");

    for (len, accepted) in [
        (MENSAJE_MIN - 1, false),
        (MENSAJE_MIN, true),
        (MENSAJE_MAX, true),
        (MENSAJE_MAX + 1, false),
    ] {
        let form = form_with(&"a".repeat(len));
        ensure!(
            form.can_submit() == accepted,
            "{len} characters: expected accepted={accepted}"
        );
    }

    let too_long = form_with(&"a".repeat(MENSAJE_MAX + 1));
    let message = too_long
        .field_error(ContactField::Mensaje)
        .ok_or_else(|| anyhow!("301 characters produced no field error"))?;
    ensure!(message.contains(TOO_LONG), "unexpected copy: {message}");
    match block_on(too_long.submit(&fixture.services.contacto)) {
        Err(FormError::Invalid(_)) => {}
        other => anyhow::bail!("over-long message was not rejected locally: {other:?}"),
    }
    ensure!(
        !fixture.mock.called(Method::Post, CONTACTO),
        "invalid message reached the backend"
    );

    let thanks = block_on(form_with(&"a".repeat(MENSAJE_MAX)).submit(&fixture.services.contacto))
        .map_err(|err| anyhow!("300-character message failed: {}", err.banner()))?;
    ensure!(
        thanks == "Gracias Ana, tu mensaje ha sido enviado!",
        "unexpected confirmation: {thanks}"
    );
    ensure!(fixture.mock.count(Method::Post, CONTACTO) == 1, "expected one POST");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logic_run_covers_both_edges() {
        contact_boundaries().expect("boundaries");
    }

    #[test]
    fn scenario_is_named_for_the_cli() {
        let logic = ContactBoundariesScenario
            .as_logic_scenario()
            .expect("logic scenario");
        assert_eq!(logic.name, "contact-boundaries");
    }
}
