use crate::dom;
use crate::input::PointerTarget;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(window: &web::Window, target: Rc<RefCell<PointerTarget>>) {
    wire_mousemove(window, target.clone());
    wire_touchstart(window, target.clone());
    wire_touchmove(window, target.clone());
    wire_touchend(window, target);
}

fn passive() -> web::AddEventListenerOptions {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    opts
}

fn first_touch(ev: &web::TouchEvent) -> Option<(u32, f32, f32)> {
    let touches = ev.touches();
    let t = touches.get(0)?;
    Some((touches.length(), t.client_x() as f32, t.client_y() as f32))
}

fn wire_mousemove(window: &web::Window, target: Rc<RefCell<PointerTarget>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (w, h) = dom::viewport_size();
        target
            .borrow_mut()
            .on_mouse_move(ev.client_x() as f32, ev.client_y() as f32, w, h);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touchstart(window: &web::Window, target: Rc<RefCell<PointerTarget>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some((n, x, y)) = first_touch(&ev) {
            target.borrow_mut().on_touch_start(n, x, y);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        closure.as_ref().unchecked_ref(),
        &passive(),
    );
    closure.forget();
}

fn wire_touchmove(window: &web::Window, target: Rc<RefCell<PointerTarget>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some((n, x, y)) = first_touch(&ev) {
            let (w, h) = dom::viewport_size();
            target.borrow_mut().on_touch_move(n, x, y, w, h);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        closure.as_ref().unchecked_ref(),
        &passive(),
    );
    closure.forget();
}

fn wire_touchend(window: &web::Window, target: Rc<RefCell<PointerTarget>>) {
    let closure = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
        target.borrow_mut().on_touch_end();
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "touchend",
        closure.as_ref().unchecked_ref(),
        &passive(),
    );
    closure.forget();
}
