use crate::i18n::t;
use yew::prelude::*;

const TEAM: [(&str, &str); 2] = [
    (
        "Cristóbal Barrientos",
        "https://www.linkedin.com/in/crist%C3%B3bal-barrientos-30931b2b2/",
    ),
    ("Tomás Zapata", "https://www.linkedin.com/in/tom%C3%A1s-zapata-labra/"),
];

#[function_component(Footer)]
pub fn footer() -> Html {
    let links = TEAM.iter().enumerate().map(|(idx, (name, url))| {
        html! {
            <>
                if idx > 0 { <span class="mx-2" aria-hidden="true">{ "|" }</span> }
                <a href={*url} target="_blank" rel="noopener noreferrer">{ *name }</a>
            </>
        }
    });
    html! {
        <footer class="footer text-center py-3" role="contentinfo">
            <div>{ t("footer.copyright") }</div>
            <div class="footer-links">
                <span>{ format!("{}: ", t("footer.team")) }</span>
                { for links }
            </div>
        </footer>
    }
}
