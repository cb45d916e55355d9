#![cfg(target_arch = "wasm32")]
use crate::constants::CANVAS_ID;
use crate::input::PointerTarget;
use scene_core::constants::CLEAR_COLOR;
use scene_core::overlay::OverlayVariant;
use scene_core::{InstantClock, Scene, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn config_from_page() -> SceneConfig {
    let mut config = SceneConfig::default();
    if let Some(name) = dom::overlay_query() {
        match OverlayVariant::parse(&name) {
            Some(v) => config.overlay = v,
            None => log::warn!("[overlay] unknown variant '{}', using default", name),
        }
    }
    config
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Size the backing store before the surface is configured
    let resize = events::wire_canvas_resize(&window, &canvas);

    let mut config = config_from_page();
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    log::info!("[frame] seed {}", seed);
    config.seed = Some(seed);
    let mut registry = dom::DomRegistry::new(document);
    let scene = Scene::from_config(config, &mut registry);
    loader::spawn_model_load(scene.model_slot());

    let gpu = frame::init_gpu(&canvas, CLEAR_COLOR)
        .await
        .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;

    let pointer = Rc::new(RefCell::new(PointerTarget::default()));
    events::wire_pointer_handlers(&window, pointer.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        clock: InstantClock::new(),
        pointer,
        resize,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
