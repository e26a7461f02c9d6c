use crate::a11y::{restore_focus, trap_focus_in};
use crate::i18n::t;
use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Element focused again once the dialog closes.
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_id = format!("modal-{}", *modal_id);
    let container_ref = use_node_ref();
    let was_open = use_mut_ref(|| false);

    {
        let container_ref = container_ref.clone();
        let container_id = container_id.clone();
        use_effect_with(
            (props.open, props.return_focus_id.clone()),
            move |(open, return_focus_id)| {
                let previously = was_open.replace(*open);
                if *open {
                    if let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                        let _ = el.focus();
                    }
                    trap_focus_in(&container_id);
                } else if previously && let Some(id) = return_focus_id.as_ref() {
                    restore_focus(id);
                }
                || {}
            },
        );
    }

    if !props.open {
        return Html::default();
    }

    let title_id = format!("modal-title-{}", *modal_id);
    let desc_id = props
        .description
        .as_ref()
        .map(|_| format!("modal-desc-{}", *modal_id));
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    html! {
        <div class="modal-backdrop show d-block" role="presentation">
            <div
                id={container_id}
                class="modal d-block"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                aria-describedby={desc_id.clone()}
                tabindex="-1"
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <div class="modal-dialog">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h2 id={title_id} class="modal-title h5">{ props.title.clone() }</h2>
                            <button type="button" class="btn-close" aria-label={t("ui.close")} onclick={close}>
                                <span aria-hidden="true">{ "×" }</span>
                            </button>
                        </div>
                        if let (Some(id), Some(text)) = (desc_id, props.description.clone()) {
                            <p id={id} class="modal-description px-3 pt-3 mb-0">{ text }</p>
                        }
                        <div class="modal-body">
                            { for props.children.iter() }
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(open: bool) -> Props {
        Props {
            open,
            title: "Recuperar contraseña".into(),
            on_close: Callback::noop(),
            description: Some("Responde tus preguntas.".into()),
            return_focus_id: None,
            children: Children::default(),
        }
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(false)).render());
        assert!(!html.contains("role=\"dialog\""));
    }

    #[test]
    fn open_modal_is_labelled() {
        let html = block_on(LocalServerRenderer::<Modal>::with_props(props(true)).render());
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Recuperar contraseña"));
        assert!(html.contains("Responde tus preguntas."));
    }
}
