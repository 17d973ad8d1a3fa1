use crate::audio;
use crate::dom;
use heli_core::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<AppState>>) {
    let key = ev.key();
    // Bound keys would otherwise scroll the page.
    if app.borrow_mut().on_key_down(&key) {
        ev.prevent_default();
    }
}

pub fn wire_keydown(app: Rc<RefCell<AppState>>, audio_ctx: Option<web::AudioContext>) {
    if let Some(window) = web::window() {
        dom::listen(&window, "keydown", move |ev: web::KeyboardEvent| {
            if let Some(ctx) = &audio_ctx {
                audio::resume(ctx);
            }
            handle_keydown(&ev, &app);
        });
    }
}
