use crate::texture::{decode_image, DecodedImage};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_response(url: &str) -> anyhow::Result<web::Response> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: not a Response ({:?})", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} for {url}", resp.status());
    }
    Ok(resp)
}

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let resp = fetch_response(url).await?;
    let promise = resp
        .text()
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("read {url}: body is not text"))
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let resp = fetch_response(url).await?;
    let promise = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and decode a panorama image.
pub async fn load_panorama(url: &str, max_dim: u32) -> anyhow::Result<DecodedImage> {
    let bytes = fetch_bytes(url).await?;
    log::debug!("[assets] {} bytes from {}", bytes.len(), url);
    decode_image(&bytes, max_dim)
}
