use crate::events::PendingResize;
use crate::input::PointerTarget;
use crate::render;
use scene_core::{FrameRenderer, InstantClock, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Scene,
    pub clock: InstantClock,
    pub pointer: Rc<RefCell<PointerTarget>>,
    pub resize: PendingResize,
    pub gpu: render::GpuState<'a>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        if let Some((w, h)) = self.resize.take() {
            self.scene.resize(w, h);
            self.gpu.resize(w, h);
        }
        let target = self.pointer.borrow().target;
        let report = self.scene.frame(&self.clock, target, &mut self.gpu);
        if let Some(change) = report.transition {
            log::debug!("[frame] overlay {:?}", change);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    clear: [f32; 3],
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, clear).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}
