//! Labelled form controls with inline validation feedback.

use condor_core::FieldErrors;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

pub fn checkbox_checked(e: &Event) -> bool {
    e.target_unchecked_into::<HtmlInputElement>().checked()
}

/// Message for `field`, shown once it has a value or any field of the form was edited.
#[must_use]
pub fn visible_error(
    errors: &FieldErrors,
    field: &str,
    value: &str,
    touched: bool,
) -> Option<AttrValue> {
    if !touched && value.is_empty() {
        return None;
    }
    errors.get(field).map(|msg| AttrValue::from(msg.to_string()))
}

#[derive(Properties, PartialEq, Clone)]
pub struct FieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub maxlength: Option<usize>,
    #[prop_or_default]
    pub rows: Option<u32>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub autocomplete: Option<AttrValue>,
}

/// Text input, or a textarea when `rows` is set.
#[function_component(Field)]
pub fn field(p: &FieldProps) -> Html {
    let error_id = format!("{}-error", p.id);
    let invalid = p.error.is_some();
    let class = classes!("form-control", invalid.then_some("is-invalid"));
    let described_by = invalid.then(|| error_id.clone());
    let maxlength = p.maxlength.map(|max| max.to_string());

    let control = if let Some(rows) = p.rows {
        let oninput = {
            let cb = p.on_input.clone();
            Callback::from(move |e: InputEvent| cb.emit(textarea_value(&e)))
        };
        html! {
            <textarea
                id={p.id.clone()}
                {class}
                rows={rows.to_string()}
                value={p.value.clone()}
                placeholder={p.placeholder.clone()}
                maxlength={maxlength}
                disabled={p.disabled}
                aria-invalid={invalid.to_string()}
                aria-describedby={described_by}
                {oninput}
            />
        }
    } else {
        let oninput = {
            let cb = p.on_input.clone();
            Callback::from(move |e: InputEvent| cb.emit(input_value(&e)))
        };
        html! {
            <input
                id={p.id.clone()}
                type={p.input_type.clone()}
                {class}
                value={p.value.clone()}
                placeholder={p.placeholder.clone()}
                maxlength={maxlength}
                autocomplete={p.autocomplete.clone()}
                disabled={p.disabled}
                aria-invalid={invalid.to_string()}
                aria-describedby={described_by}
                {oninput}
            />
        }
    };

    html! {
        <div class="mb-3">
            <label for={p.id.clone()} class="form-label">{ p.label.clone() }</label>
            { control }
            if let Some(error) = p.error.clone() {
                <div id={error_id} class="invalid-feedback d-block">{ error }</div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props() -> FieldProps {
        FieldProps {
            id: "correo".into(),
            label: "Correo".into(),
            value: "ana@".into(),
            on_input: Callback::noop(),
            input_type: "email".into(),
            error: Some("El Correo no es válido.".into()),
            placeholder: None,
            maxlength: None,
            rows: None,
            disabled: false,
            autocomplete: None,
        }
    }

    #[test]
    fn error_is_linked_to_the_control() {
        let html = block_on(LocalServerRenderer::<Field>::with_props(props()).render());
        assert!(html.contains("is-invalid"));
        assert!(html.contains("aria-describedby=\"correo-error\""));
        assert!(html.contains("El Correo no es válido."));
    }

    #[test]
    fn rows_switch_to_a_textarea() {
        let html = block_on(
            LocalServerRenderer::<Field>::with_props(FieldProps {
                rows: Some(4),
                error: None,
                ..props()
            })
            .render(),
        );
        assert!(html.contains("<textarea"));
        assert!(!html.contains("is-invalid"));
    }

    #[test]
    fn untouched_empty_fields_hide_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("nombre", "El nombre es obligatorio.");
        assert_eq!(visible_error(&errors, "nombre", "", false), None);
        assert_eq!(
            visible_error(&errors, "nombre", "", true).as_deref(),
            Some("El nombre es obligatorio.")
        );
    }
}
