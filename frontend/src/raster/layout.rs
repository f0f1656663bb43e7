use common::model::card::CardRecord;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::components::templates::SCHOOL_NAME;
use crate::qr::QrMatrix;

pub const CARD_WIDTH: f64 = 350.0;
pub const CARD_HEIGHT: f64 = 540.0;

const PHOTO_WIDTH: f64 = 112.0;
const PHOTO_HEIGHT: f64 = 144.0;
const CLASSIC_QR_SIZE: f64 = 80.0;
const MODERN_QR_SIZE: f64 = 72.0;
const FONT: &str = "Helvetica, Arial, sans-serif";

fn font(weight: &str, size: u32) -> String {
    format!("{} {}px {}", weight, size, FONT)
}

pub fn draw_classic(
    ctx: &CanvasRenderingContext2d,
    card: &CardRecord,
    photo: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    let student = &card.student;

    ctx.set_fill_style_str("#f9fafb");
    ctx.fill_rect(0.0, 0.0, CARD_WIDTH, CARD_HEIGHT);
    ctx.set_fill_style_str("#4f46e5");
    ctx.fill_rect(0.0, 0.0, CARD_WIDTH, 64.0);

    ctx.set_text_baseline("alphabetic");
    ctx.set_text_align("left");
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font(&font("bold", 20));
    ctx.fill_text("STUDENT ID", 16.0, 30.0)?;
    ctx.set_font(&font("500", 13));
    ctx.fill_text(SCHOOL_NAME, 16.0, 52.0)?;

    draw_photo(ctx, photo, 16.0, 80.0, "#e5e7eb")?;

    let x = 16.0 + PHOTO_WIDTH + 16.0;
    ctx.set_fill_style_str("#111827");
    ctx.set_font(&font("bold", 18));
    ctx.fill_text(&student.name, x, 100.0)?;

    let rows = [
        ("Roll No:", student.roll_number.clone()),
        ("Class:", student.class_label()),
        ("Rack No:", student.rack_number.clone()),
        ("Bus Route:", student.bus_route.clone()),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = 126.0 + 22.0 * i as f64;
        ctx.set_font(&font("normal", 13));
        ctx.set_fill_style_str("#6b7280");
        ctx.fill_text(label, x, y)?;
        ctx.set_font(&font("600", 13));
        ctx.set_fill_style_str("#111827");
        ctx.fill_text(value, x + 72.0, y)?;
    }

    if !student.allergies.is_empty() {
        ctx.set_font(&font("bold", 13));
        ctx.set_fill_style_str("#dc2626");
        ctx.fill_text("Allergies:", 16.0, 252.0)?;
        ctx.set_font(&font("normal", 12));
        ctx.set_fill_style_str("#991b1b");
        draw_wrapped(ctx, &student.allergies, 16.0, 272.0, CARD_WIDTH - 32.0)?;
    }

    draw_qr(
        ctx,
        card,
        CARD_WIDTH - 16.0 - CLASSIC_QR_SIZE,
        CARD_HEIGHT - 60.0 - CLASSIC_QR_SIZE,
        CLASSIC_QR_SIZE,
    );

    ctx.set_font(&font("normal", 11));
    ctx.set_fill_style_str("#6b7280");
    ctx.fill_text(&format!("ID: {}", card.id), 16.0, 504.0)?;
    ctx.fill_text(&format!("Issue Date: {}", card.created_date()), 16.0, 522.0)?;
    Ok(())
}

pub fn draw_modern(
    ctx: &CanvasRenderingContext2d,
    card: &CardRecord,
    photo: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    let student = &card.student;
    let center = CARD_WIDTH / 2.0;

    ctx.set_fill_style_str("#1d4ed8");
    ctx.fill_rect(0.0, 0.0, CARD_WIDTH, CARD_HEIGHT);
    ctx.set_fill_style_str("#4f46e5");
    ctx.fill_rect(0.0, 0.0, CARD_WIDTH, CARD_HEIGHT / 2.0);

    ctx.set_text_baseline("alphabetic");
    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("left");
    ctx.set_font(&font("bold", 20));
    ctx.fill_text(SCHOOL_NAME, 24.0, 44.0)?;
    ctx.set_text_align("right");
    ctx.set_font(&font("600", 12));
    ctx.fill_text("ID CARD", CARD_WIDTH - 24.0, 42.0)?;

    draw_photo(ctx, photo, center - PHOTO_WIDTH / 2.0, 68.0, "rgba(255,255,255,0.15)")?;

    ctx.set_text_align("center");
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font(&font("bold", 20));
    ctx.fill_text(&student.name, center, 244.0)?;
    ctx.set_font(&font("normal", 13));
    ctx.set_fill_style_str("rgba(255,255,255,0.8)");
    ctx.fill_text(
        &format!("{} \u{2022} Roll No: {}", student.class_label(), student.roll_number),
        center,
        266.0,
    )?;

    ctx.set_fill_style_str("rgba(255,255,255,0.12)");
    ctx.fill_rect(24.0, 286.0, CARD_WIDTH - 48.0, 76.0);
    let rows = [
        ("Rack No:", student.rack_number.as_str()),
        ("Bus Route:", student.bus_route.as_str()),
        ("Issued:", card.created_date()),
    ];
    ctx.set_text_align("left");
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = 308.0 + 22.0 * i as f64;
        ctx.set_font(&font("normal", 13));
        ctx.set_fill_style_str("rgba(255,255,255,0.6)");
        ctx.fill_text(label, 36.0, y)?;
        ctx.set_font(&font("600", 13));
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_text(value, 140.0, y)?;
    }

    if !student.allergies.is_empty() {
        ctx.set_font(&font("600", 13));
        ctx.set_fill_style_str("#fca5a5");
        ctx.fill_text("Allergies:", 24.0, 392.0)?;
        ctx.set_font(&font("normal", 12));
        ctx.set_fill_style_str("#ffffff");
        draw_wrapped(ctx, &student.allergies, 24.0, 412.0, CARD_WIDTH - 132.0)?;
    }

    draw_qr(
        ctx,
        card,
        CARD_WIDTH - 24.0 - MODERN_QR_SIZE,
        CARD_HEIGHT - 32.0 - MODERN_QR_SIZE,
        MODERN_QR_SIZE,
    );

    ctx.set_text_align("center");
    ctx.set_font(&font("normal", 11));
    ctx.set_fill_style_str("rgba(255,255,255,0.7)");
    ctx.fill_text(&format!("ID: {}", card.id), center, 522.0)?;
    Ok(())
}

/// Photo cropped to fill its box, or a grey placeholder box.
fn draw_photo(
    ctx: &CanvasRenderingContext2d,
    photo: Option<&HtmlImageElement>,
    x: f64,
    y: f64,
    placeholder: &str,
) -> Result<(), JsValue> {
    ctx.set_fill_style_str(placeholder);
    ctx.fill_rect(x, y, PHOTO_WIDTH, PHOTO_HEIGHT);

    match photo {
        Some(image) if image.natural_width() > 0 && image.natural_height() > 0 => {
            let (sx, sy, sw, sh) = cover_crop(
                image.natural_width() as f64,
                image.natural_height() as f64,
                PHOTO_WIDTH,
                PHOTO_HEIGHT,
            );
            ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                sx,
                sy,
                sw,
                sh,
                x,
                y,
                PHOTO_WIDTH,
                PHOTO_HEIGHT,
            )
        }
        _ => {
            ctx.set_text_align("center");
            ctx.set_font(&font("normal", 12));
            ctx.set_fill_style_str("#9ca3af");
            ctx.fill_text("No photo", x + PHOTO_WIDTH / 2.0, y + PHOTO_HEIGHT / 2.0)?;
            ctx.set_text_align("left");
            Ok(())
        }
    }
}

/// QR code of the student's details on a white square with a one-module
/// margin. Nothing is drawn when the payload cannot be encoded.
fn draw_qr(ctx: &CanvasRenderingContext2d, card: &CardRecord, x: f64, y: f64, size: f64) {
    let Some(matrix) = QrMatrix::for_student(&card.student) else {
        return;
    };
    let module = size / (matrix.width() + 2) as f64;

    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(x, y, size, size);
    ctx.set_fill_style_str("#111827");
    for (mx, my) in matrix.dark_modules() {
        let (cx, cy) = module_origin(x, y, module, mx, my);
        // Slight overlap hides anti-aliasing seams between modules.
        ctx.fill_rect(cx, cy, module + 0.25, module + 0.25);
    }
}

/// Top-left corner of module `(mx, my)` inside a code drawn at `(x, y)`,
/// past the one-module margin.
fn module_origin(x: f64, y: f64, module: f64, mx: usize, my: usize) -> (f64, f64) {
    (x + module * (mx + 1) as f64, y + module * (my + 1) as f64)
}

fn draw_wrapped(
    ctx: &CanvasRenderingContext2d,
    tags: &[String],
    x: f64,
    y: f64,
    max_width: f64,
) -> Result<(), JsValue> {
    let lines = wrap_tags(tags, max_width, |text| {
        ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    });
    for (i, line) in lines.iter().enumerate() {
        ctx.fill_text(line, x, y + 16.0 * i as f64)?;
    }
    Ok(())
}

/// Source rectangle `(sx, sy, sw, sh)` that scales a `src_w`x`src_h` image to
/// cover a `dst_w`x`dst_h` box, centered, without distortion.
pub fn cover_crop(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> (f64, f64, f64, f64) {
    let src_ratio = src_w / src_h;
    let dst_ratio = dst_w / dst_h;
    if src_ratio > dst_ratio {
        let sw = src_h * dst_ratio;
        ((src_w - sw) / 2.0, 0.0, sw, src_h)
    } else {
        let sh = src_w / dst_ratio;
        (0.0, (src_h - sh) / 2.0, src_w, sh)
    }
}

/// Joins tags with `", "` into lines no wider than `max_width`. A single tag
/// wider than the limit gets a line of its own.
pub fn wrap_tags(tags: &[String], max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for tag in tags {
        let candidate = if current.is_empty() {
            tag.clone()
        } else {
            format!("{}, {}", current, tag)
        };
        if !current.is_empty() && measure(&candidate) > max_width {
            lines.push(format!("{},", current));
            current = tag.clone();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect(actual: (f64, f64, f64, f64), expected: (f64, f64, f64, f64)) {
        let pairs = [
            (actual.0, expected.0),
            (actual.1, expected.1),
            (actual.2, expected.2),
            (actual.3, expected.3),
        ];
        for (a, e) in pairs {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wide_image_is_cropped_horizontally() {
        assert_rect(cover_crop(400.0, 144.0, 112.0, 144.0), (144.0, 0.0, 112.0, 144.0));
    }

    #[test]
    fn tall_image_is_cropped_vertically() {
        assert_rect(cover_crop(112.0, 400.0, 112.0, 144.0), (0.0, 128.0, 112.0, 144.0));
    }

    #[test]
    fn tags_wrap_by_measured_width() {
        let measure = |s: &str| s.len() as f64;
        let lines = wrap_tags(&tags(&["Nuts", "Dairy", "Seafood"]), 12.0, measure);
        assert_eq!(lines, vec!["Nuts, Dairy,", "Seafood"]);
    }

    #[test]
    fn qr_modules_start_past_the_margin() {
        let (x, y) = module_origin(254.0, 400.0, 2.0, 0, 0);
        assert!((x - 256.0).abs() < 1e-9 && (y - 402.0).abs() < 1e-9);
        let (x, y) = module_origin(254.0, 400.0, 2.0, 3, 5);
        assert!((x - 262.0).abs() < 1e-9 && (y - 412.0).abs() < 1e-9);
    }

    #[test]
    fn qr_fits_above_the_classic_footer() {
        let top = CARD_HEIGHT - 60.0 - CLASSIC_QR_SIZE;
        assert!(top + CLASSIC_QR_SIZE < 504.0 - 11.0);
        assert!(CARD_WIDTH - 16.0 - CLASSIC_QR_SIZE > 16.0 + PHOTO_WIDTH);
    }

    #[test]
    fn no_tags_no_lines() {
        assert!(wrap_tags(&[], 100.0, |s| s.len() as f64).is_empty());
    }
}
