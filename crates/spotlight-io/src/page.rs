//! Page-wide drag-and-drop behavior.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Stop the browser from navigating to a file dropped anywhere on the
/// page.
///
/// Registers one window-level listener for the drag events that cancels
/// their default action. Drops on the upload zone still reach its own
/// handlers first. The listener lives as long as the page.
///
/// # Errors
///
/// Returns [`PageError`] if there is no window or registration fails.
pub fn suppress_default_drops() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        event.prevent_default();
    });
    for name in DRAG_EVENTS {
        window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
    }
    listener.forget();
    Ok(())
}
