use scene_core::model::{ModelData, ModelSlot};
use scene_core::SceneError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetch the model in the background and publish it into `slot`.
/// Failure leaves the skull absent for the rest of the session.
pub fn spawn_model_load(slot: ModelSlot) {
    spawn_local(async move {
        log::info!("[model] fetching {}", slot.path());
        let result = fetch_model(slot.path()).await;
        slot.resolve(result);
    });
}

async fn fetch_model(path: &str) -> Result<ModelData, SceneError> {
    let bytes = fetch_bytes(path)
        .await
        .map_err(|e| SceneError::asset_load(path, e))?;
    ModelData::from_glb_bytes(path, &bytes)
}

async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(path, &opts)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let buffer = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
