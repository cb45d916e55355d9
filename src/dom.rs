use crate::constants::{MAX_DEVICE_PIXEL_RATIO, OVERLAY_QUERY_KEY, STAT_ATTRIBUTE};
use scene_core::hud::{SinkRegistry, TextSink};
use scene_core::SceneError;
use web_sys as web;

/// Match the canvas backing store to its CSS size, with the pixel ratio
/// capped. Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_DEVICE_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let w = ((rect.width() * dpr).round() as u32).max(1);
    let h = ((rect.height() * dpr).round() as u32).max(1);
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
    }
    (w, h)
}

/// Viewport size in CSS pixels, used to normalize pointer positions.
pub fn viewport_size() -> (f32, f32) {
    let Some(window) = web::window() else {
        return (1.0, 1.0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// `?overlay=` value from the page URL, if present.
pub fn overlay_query() -> Option<String> {
    let search = web::window()?.location().search().ok()?;
    let params = web::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(OVERLAY_QUERY_KEY)
}

/// A HUD value rendered into one element's text content.
pub struct DomStatSink {
    tag: String,
    element: web::Element,
}

impl TextSink for DomStatSink {
    fn set_text(&mut self, text: &str) -> Result<(), SceneError> {
        if !self.element.is_connected() {
            return Err(SceneError::Sink {
                tag: self.tag.clone(),
                reason: "element detached from document".into(),
            });
        }
        self.element.set_text_content(Some(text));
        Ok(())
    }
}

/// Resolves HUD tags to `[data-stat="tag"]` elements.
pub struct DomRegistry {
    document: web::Document,
}

impl DomRegistry {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }
}

impl SinkRegistry for DomRegistry {
    fn lookup(&mut self, tag: &str) -> Option<Box<dyn TextSink>> {
        let selector = format!("[{}=\"{}\"]", STAT_ATTRIBUTE, tag);
        match self.document.query_selector(&selector) {
            Ok(Some(element)) => Some(Box::new(DomStatSink {
                tag: tag.to_string(),
                element,
            })),
            Ok(None) => None,
            Err(e) => {
                log::warn!("[hud] selector {} failed: {:?}", selector, e);
                None
            }
        }
    }
}
