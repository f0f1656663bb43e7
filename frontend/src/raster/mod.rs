use common::export::download_file_name;
use common::model::card::{CardRecord, TemplateId};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement};

use crate::helpers::{js_message, show_toast, ToastKind};

mod layout;

pub use layout::{CARD_HEIGHT, CARD_WIDTH};

/// Output pixels per layout pixel.
const PIXEL_RATIO: f64 = 2.0;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RasterizationError(String);

impl RasterizationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<JsValue> for RasterizationError {
    fn from(value: JsValue) -> Self {
        Self(js_message(&value))
    }
}

/// Renders `card` with `template` and returns a `data:image/png` URL.
pub async fn rasterize(card: &CardRecord, template: TemplateId) -> Result<String, RasterizationError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RasterizationError::new("no document available"))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| RasterizationError::new("canvas is not supported"))?;
    canvas.set_width((CARD_WIDTH * PIXEL_RATIO) as u32);
    canvas.set_height((CARD_HEIGHT * PIXEL_RATIO) as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| RasterizationError::new("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| RasterizationError::new("2d context unavailable"))?;
    ctx.scale(PIXEL_RATIO, PIXEL_RATIO)?;

    let photo = match card.student.photo.as_deref() {
        Some(src) => Some(load_image(src).await?),
        None => None,
    };

    match template {
        TemplateId::Classic => layout::draw_classic(&ctx, card, photo.as_ref())?,
        TemplateId::Modern => layout::draw_modern(&ctx, card, photo.as_ref())?,
    }

    Ok(canvas.to_data_url_with_type("image/png")?)
}

/// Saves `data_url` through a temporary anchor element.
pub fn download_data_url(data_url: &str, file_name: &str) -> Result<(), RasterizationError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RasterizationError::new("no document available"))?;
    let link: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| RasterizationError::new("cannot create download link"))?;
    link.set_href(data_url);
    link.set_download(file_name);
    link.click();
    Ok(())
}

/// Rasterizes and downloads `card`, reporting the outcome with a toast.
/// Failures end here; the user can press download again.
pub async fn download_card(card: CardRecord, template: TemplateId) {
    let file_name = download_file_name(&card.student.name);
    let result = match rasterize(&card, template).await {
        Ok(url) => download_data_url(&url, &file_name),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            log::info!("downloaded card {} as {}", card.id, file_name);
            show_toast("ID card downloaded", ToastKind::Success);
        }
        Err(e) => {
            log::error!("failed to generate image for card {}: {}", card.id, e);
            show_toast("Failed to generate image", ToastKind::Error);
        }
    }
}

/// Decodes an image from `src` (a data URI) and waits until it is usable.
async fn load_image(src: &str) -> Result<HtmlImageElement, RasterizationError> {
    let image = HtmlImageElement::new()?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    JsFuture::from(loaded)
        .await
        .map_err(|_| RasterizationError::new("photo could not be decoded"))?;
    image.set_onload(None);
    image.set_onerror(None);
    Ok(image)
}
