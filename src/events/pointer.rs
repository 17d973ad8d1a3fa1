use crate::audio;
use crate::dom;
use glam::Vec2;
use heli_core::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<AppState>>,
    pub audio_ctx: Option<web::AudioContext>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
}

/// Pointer position relative to the canvas' padding edge, in CSS pixels.
#[inline]
pub fn pointer_offset(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.offset_x() as f32, ev.offset_y() as f32)
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointerdown", move |ev: web::PointerEvent| {
        w.app.borrow_mut().on_pointer_down(pointer_offset(&ev));
        if let Some(ctx) = &w.audio_ctx {
            audio::resume(ctx);
        }
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointermove", move |ev: web::PointerEvent| {
        w.app.borrow_mut().on_pointer_move(pointer_offset(&ev));
    });
}

fn wire_pointerup(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointerup", move |_: web::PointerEvent| {
        w.app.borrow_mut().on_pointer_up();
    });
}

fn wire_pointerleave(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::listen(&target, "pointerleave", move |_: web::PointerEvent| {
        w.app.borrow_mut().on_pointer_leave();
    });
}
