// Accessibility helpers

use wasm_bindgen::JsCast;

/// Id of the polite live region rendered by the application shell.
pub const STATUS_REGION_ID: &str = "condor-status";

const FOCUSABLE: &str = "a[href], button:not([disabled]), input:not([disabled]), \
select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// Critical CSS for focus rings, the skip link and screen reader only text.
///
/// Injected by the shell ahead of page content so keyboard users always see where
/// focus is, even before the stylesheet loads.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #2e7d32;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;} .sr-only:focus{position:static;width:auto;height:auto;margin:0;clip:auto;}"
}

/// Announce `msg` through the live region.
pub fn set_status(msg: &str) {
    if let Some(node) =
        crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

fn focusable_in(container: &web_sys::Element) -> Vec<web_sys::HtmlElement> {
    let Ok(nodes) = container.query_selector_all(FOCUSABLE) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.item(idx))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// Keep Tab and Shift+Tab cycling inside the element with `container_id`.
///
/// The listener lives as long as the container node does.
pub fn trap_focus_in(container_id: &str) {
    let Some(container) = crate::dom::document().and_then(|doc| doc.get_element_by_id(container_id))
    else {
        return;
    };
    if container.get_attribute("data-focus-trap").is_some() {
        return;
    }
    let _ = container.set_attribute("data-focus-trap", "on");

    let scope = container.clone();
    let listener = gloo::events::EventListener::new(&container, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        if event.key() != "Tab" {
            return;
        }
        let items = focusable_in(&scope);
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return;
        };
        let active = crate::dom::document().and_then(|doc| doc.active_element());
        let on = |target: &web_sys::HtmlElement| {
            active
                .as_ref()
                .is_some_and(|el| el == target.unchecked_ref::<web_sys::Element>())
        };
        if event.shift_key() && on(first) {
            event.prevent_default();
            let _ = last.focus();
        } else if !event.shift_key() && on(last) {
            event.prevent_default();
            let _ = first.focus();
        }
    });
    listener.forget();
}

/// Move focus back to the element that opened a dialog.
pub fn restore_focus(element_id: &str) {
    if let Some(el) = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
