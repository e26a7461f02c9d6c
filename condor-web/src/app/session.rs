use condor_core::{Services, SessionSnapshot};
use yew::prelude::*;

/// Keep `snapshot` in step with the session: local changes arrive through the
/// subscription, other tabs through `storage` events.
#[hook]
pub fn use_session_flags(services: &Services, snapshot: UseStateHandle<SessionSnapshot>) {
    use_effect_with(services.session.clone(), move |session| {
        let target = snapshot.clone();
        let subscription = session.subscribe(move |next| target.set(next.clone()));
        snapshot.set(session.snapshot());

        #[cfg(target_arch = "wasm32")]
        let storage_listener = crate::dom::window().map(|win| {
            use wasm_bindgen::JsCast;
            let session = session.clone();
            gloo::events::EventListener::new(&win, "storage", move |event| {
                let key = event
                    .dyn_ref::<web_sys::StorageEvent>()
                    .and_then(web_sys::StorageEvent::key);
                session.handle_external_change(key.as_deref());
            })
        });

        move || {
            drop(subscription);
            #[cfg(target_arch = "wasm32")]
            drop(storage_listener);
        }
    });
}
