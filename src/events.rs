use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

mod pointer;
pub use pointer::wire_pointer_handlers;

/// Backing size waiting to be applied by the next frame.
pub type PendingResize = Rc<Cell<Option<(u32, u32)>>>;

/// Keep the canvas backing store in sync with its CSS size and queue the new
/// size for the frame loop.
pub fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) -> PendingResize {
    let pending: PendingResize = Rc::new(Cell::new(Some(dom::sync_canvas_backing_size(canvas))));
    let canvas = canvas.clone();
    let queued = pending.clone();
    let closure = Closure::wrap(Box::new(move || {
        queued.set(Some(dom::sync_canvas_backing_size(&canvas)));
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
    pending
}
