use crate::i18n::t;
use condor_core::Notice;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

/// Fixed banner for the latest notice. Success and info banners close themselves.
#[function_component(Notification)]
pub fn notification(props: &Props) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.notice.clone(), move |notice| {
            let timer = notice
                .as_ref()
                .and_then(|notice| notice.kind.auto_dismiss_ms())
                .map(|ms| Timeout::new(ms, move || on_dismiss.emit(())));
            move || drop(timer)
        });
    }

    let Some(notice) = props.notice.as_ref() else {
        return Html::default();
    };
    let close = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class={classes!(notice.kind.css_class(), "notification")} role="alert">
            <span>{ notice.text.clone() }</span>
            <button type="button" class="close" aria-label={t("ui.dismiss")} onclick={close}>
                <span aria-hidden="true">{ "×" }</span>
            </button>
        </div>
    }
}
