use js_sys::Date;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::config::TOAST_DURATION_MS;

/// Kind of toast, mapped to a CSS modifier class.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

/// Displays `message` for a few seconds. Clicking the toast dismisses it
/// early. Silently does nothing when there is no document.
pub fn show_toast(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    toast.set_class_name(kind.class());
    let toast: HtmlElement = toast.unchecked_into();
    toast.set_title("Click to dismiss");
    toast.set_onclick(Some(&js_sys::Function::new_no_args("this.remove()")));

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            toast.remove();
        });
    }
}

/// Current time as ISO-8601 with milliseconds, e.g. `2024-01-01T00:00:00.000Z`.
pub fn now_iso() -> String {
    String::from(Date::new_0().to_iso_string())
}

/// Locale date for a stored ISO timestamp; unparsable input is returned as is.
pub fn format_date(iso: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }
    let date = Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }
    String::from(date.to_locale_date_string("en-US", &JsValue::UNDEFINED))
}

pub fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
