use shared::handoff::{format_message, whatsapp_url};
use shared::reveal_session::RewardAssignment;
use web_sys::window;

/// Formats the reveal result into the canonical message and hands it off to
/// WhatsApp in a new tab. The message is URL-escaped here, on the wasm side,
/// with the browser's own `encodeURIComponent`.
pub fn open_whatsapp(heading: &str, result: &RewardAssignment) {
    let message = format_message(heading, result);
    let encoded = String::from(js_sys::encode_uri_component(&message));
    let url = whatsapp_url(&encoded);
    if let Some(window) = window() {
        let _ = window.open_with_url_and_target(&url, "_blank");
    }
}
