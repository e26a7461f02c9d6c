use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Event, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent,
};
use yew::Renderer;

use condor_web::app::App;
use condor_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn render_app_at(path: &str) {
    condor_web::i18n::set_lang("es");
    dom::window()
        .expect("window")
        .history()
        .expect("history")
        .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
        .expect("push state");
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;
}

/// Let the scheduler flush pending renders.
async fn settle() {
    TimeoutFuture::new(50).await;
}

fn query(selector: &str) -> Option<web_sys::Element> {
    dom::document()?.query_selector(selector).ok().flatten()
}

/// Poll for `selector` for up to two seconds.
async fn wait_for(selector: &str) -> Option<web_sys::Element> {
    for _ in 0..40 {
        if let Some(found) = query(selector) {
            return Some(found);
        }
        settle().await;
    }
    None
}

fn type_into(id: &str, value: &str) {
    let el = dom::document()
        .and_then(|doc| doc.get_element_by_id(id))
        .expect("field exists");
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
    el.dispatch_event(&InputEvent::new("input").expect("input event"))
        .expect("dispatch input");
}

fn click(selector: &str) {
    query(selector)
        .expect("clickable element")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

#[wasm_bindgen_test]
async fn skip_link_points_to_main_landmark() {
    render_app_at("/").await;
    let doc = dom::document().expect("document");
    let skip = doc
        .query_selector("a[href='#main']")
        .expect("query skip link")
        .expect("skip link exists");
    let main = doc.get_element_by_id("main").expect("main landmark exists");
    assert_eq!(main.tag_name(), "MAIN");
    assert_eq!(main.get_attribute("role").unwrap_or_default(), "main");
    assert_eq!(skip.get_attribute("href").unwrap_or_default(), "#main");
}

#[wasm_bindgen_test]
async fn language_select_updates_html_lang() {
    render_app_at("/").await;
    let doc = dom::document().expect("document");
    let select: HtmlSelectElement = doc
        .get_element_by_id("lang-select")
        .expect("lang select")
        .dyn_into()
        .expect("cast to select");
    select.set_value("en");
    select
        .dispatch_event(&Event::new("change").expect("change event"))
        .expect("dispatch change");
    settle().await;

    let html = doc.document_element().expect("document element");
    assert_eq!(html.get_attribute("lang"), Some("en".into()));
    condor_web::i18n::set_lang("es");
}

#[wasm_bindgen_test]
async fn contact_message_over_limit_shows_inline_error() {
    render_app_at("/contacto").await;
    let doc = dom::document().expect("document");
    let textarea: HtmlTextAreaElement = doc
        .get_element_by_id("mensaje")
        .expect("message field")
        .dyn_into()
        .expect("cast to textarea");
    textarea.set_value(&"a".repeat(301));
    textarea
        .dispatch_event(&InputEvent::new("input").expect("input event"))
        .expect("dispatch input");
    settle().await;

    let error = doc
        .get_element_by_id("mensaje-error")
        .expect("inline error rendered");
    assert!(error.text_content().unwrap_or_default().contains("300 caracteres"));
}

#[wasm_bindgen_test]
async fn contact_submit_follows_form_validity() {
    render_app_at("/contacto").await;
    let submit = "form.contact-form button[type='submit']";
    assert!(query(&format!("{submit}[disabled]")).is_some());

    type_into("nombre", "Ana");
    type_into("email", "ana@condor.cl");
    type_into("mensaje", "Hola, quiero sugerir una ruta nueva.");
    settle().await;
    assert!(query(&format!("{submit}:not([disabled])")).is_some());

    type_into("email", "ana@");
    settle().await;
    assert!(query(&format!("{submit}[disabled]")).is_some());
    assert!(query("#email-error").is_some());
}

#[wasm_bindgen_test]
async fn failure_banner_is_dropped_on_navigation() {
    render_app_at("/contacto").await;
    type_into("nombre", "Ana");
    type_into("email", "ana@condor.cl");
    type_into("mensaje", "Hola, quiero sugerir una ruta nueva.");
    settle().await;
    click("form.contact-form button[type='submit']");
    assert!(
        wait_for(".alert-danger").await.is_some(),
        "unreachable backend raises a failure banner"
    );

    click("nav a[href='/']");
    settle().await;
    assert!(query(".alert-danger").is_none());
}

