use crate::constants::{BODY_TEXTURE_URL, GROUND_TEXTURE_URL, ROTOR_TEXTURE_URL, SKY_TEXTURE_URL};
use crate::texture_size::fit_within;
use anyhow::anyhow;
use heli_core::TextureSlot;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// RGBA8 pixels, rows top to bottom.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Images decoded off the frame, uploaded by the next frame.
pub type TextureQueue = Rc<RefCell<Vec<(TextureSlot, DecodedImage)>>>;

pub fn texture_url(slot: TextureSlot) -> &'static str {
    match slot {
        TextureSlot::Body => BODY_TEXTURE_URL,
        TextureSlot::Rotor => ROTOR_TEXTURE_URL,
        TextureSlot::Ground => GROUND_TEXTURE_URL,
        TextureSlot::Sky => SKY_TEXTURE_URL,
    }
}

pub async fn load_image(
    document: &web::Document,
    url: &str,
    max_dim: u32,
) -> anyhow::Result<DecodedImage> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow!("{:?}", e))?;
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow!("decode {}: {:?}", url, e))?;
    let (width, height) = fit_within(img.natural_width(), img.natural_height(), max_dim);
    if width == 0 || height == 0 {
        anyhow::bail!("{} has no pixels", url);
    }

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("not a canvas"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| anyhow!("not a 2d context"))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &img,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(|e| anyhow!("{:?}", e))?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(DecodedImage {
        width,
        height,
        rgba: data.data().0,
    })
}

/// Start loading every texture slot. Slots that fail keep the white fallback.
pub fn spawn_texture_loads(document: web::Document, max_dim: u32, queue: TextureQueue) {
    for slot in TextureSlot::ALL {
        let document = document.clone();
        let queue = queue.clone();
        spawn_local(async move {
            let url = texture_url(slot);
            match load_image(&document, url, max_dim).await {
                Ok(image) => queue.borrow_mut().push((slot, image)),
                Err(e) => log::warn!("[assets] {} failed, keeping white: {:?}", url, e),
            }
        });
    }
}
