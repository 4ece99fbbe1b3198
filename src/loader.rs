use crate::core::mesh::{decode_data_uri, resolve_relative};
use crate::core::CpuModel;
use anyhow::Context;
use instant::Instant;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("array_buffer {url}: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("read body {url}: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch and parse a `.gltf`/`.glb` asset, resolving external buffers
/// relative to `url`.
pub async fn load_model(url: &str) -> anyhow::Result<CpuModel> {
    let started = Instant::now();
    let bytes = fetch_bytes(url).await?;
    let (document, mut blob) = CpuModel::parse(&bytes).with_context(|| format!("parse {url}"))?;

    let mut buffers = Vec::with_capacity(document.buffers().len());
    for buffer in document.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => blob
                .take()
                .ok_or_else(|| anyhow::anyhow!("{url}: GLB buffer without BIN chunk"))?,
            gltf::buffer::Source::Uri(uri) => match decode_data_uri(uri) {
                Some(decoded) => decoded.with_context(|| format!("{url}: buffer {}", buffer.index()))?,
                None => fetch_bytes(&resolve_relative(url, uri)).await?,
            },
        };
        buffers.push(data);
    }

    let model = CpuModel::from_gltf(&document, &buffers).with_context(|| format!("mesh {url}"))?;
    log::info!(
        "[load] {} ok: {} primitives, {} vertices in {:.0} ms",
        url,
        model.primitives.len(),
        model.vertex_count(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(model)
}
