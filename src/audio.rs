use anyhow::{anyhow, bail};
use glam::Vec3;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

pub fn create_context() -> anyhow::Result<web::AudioContext> {
    let ctx = web::AudioContext::new().map_err(js_err)?;
    resume(&ctx);
    Ok(ctx)
}

/// Browsers hold a new context suspended until a user gesture; retry on each.
pub fn resume(audio_ctx: &web::AudioContext) {
    if audio_ctx.state() == web::AudioContextState::Suspended {
        _ = audio_ctx.resume();
    }
}

async fn fetch_and_decode(audio_ctx: &web::AudioContext, url: &str) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        bail!("{} -> HTTP {}", url, resp.status());
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    JsFuture::from(audio_ctx.decode_audio_data(&bytes).map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)
}

/// Decode `url` and start it looping through its own gain node.
pub async fn play_looping(
    audio_ctx: &web::AudioContext,
    url: &str,
    volume: f32,
) -> anyhow::Result<web::AudioBufferSourceNode> {
    let buffer = fetch_and_decode(audio_ctx, url).await?;
    let gain = create_gain(audio_ctx, volume, "track")?;
    gain.connect_with_audio_node(&audio_ctx.destination())
        .map_err(js_err)?;
    let source = audio_ctx.create_buffer_source().map_err(js_err)?;
    source.set_buffer(Some(&buffer));
    source.set_loop(true);
    source.connect_with_audio_node(&gain).map_err(js_err)?;
    source.start().map_err(js_err)?;
    log::info!("[audio] looping {} ({:.1}s)", url, buffer.duration());
    Ok(source)
}

/// Fire-and-forget soundtrack start; a failure leaves the scene silent.
pub fn spawn_soundtrack(audio_ctx: web::AudioContext, url: &'static str, volume: f32) {
    spawn_local(async move {
        if let Err(e) = play_looping(&audio_ctx, url, volume).await {
            log::warn!("[audio] {} unavailable: {:?}", url, e);
        }
    });
}

pub fn update_listener_to_camera(listener: &web::AudioListener, cam_eye: Vec3) {
    listener.set_position(cam_eye.x as f64, cam_eye.y as f64, cam_eye.z as f64);
    _ = listener.set_orientation(0.0, 0.0, -1.0, 0.0, 1.0, 0.0);
}
