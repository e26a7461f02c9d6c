use crate::i18n::t;
use yew::prelude::*;

#[function_component(AboutPage)]
pub fn about_page() -> Html {
    html! {
        <div class="main-content about">
            <h1 class="fw-bold display-5">{ t("about.title") }</h1>
            <p class="lead">{ t("about.body") }</p>
            <section>
                <h2 class="h4">{ t("about.mission_title") }</h2>
                <p>{ t("about.mission") }</p>
            </section>
            <section>
                <h2 class="h4">{ t("about.vision_title") }</h2>
                <p>{ t("about.vision") }</p>
            </section>
        </div>
    }
}
