use gloo_timers::callback::Timeout;
use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlElement};

const CONFETTI_COLORS: [&str; 7] = [
    "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff", "#ffd700",
];
const CONFETTI_COUNT: usize = 50;
const CONFETTI_STYLE_ID: &str = "confetti-keyframes";

// Each piece carries its own fall distance and spin as CSS custom properties.
const CONFETTI_CSS: &str = r#"
@keyframes confetti-fall {
    to {
        transform: translateY(var(--fall-distance)) rotate(var(--fall-spin));
        opacity: 0;
    }
}
"#;

fn ensure_keyframes(document: &Document) {
    if document.get_element_by_id(CONFETTI_STYLE_ID).is_some() {
        return;
    }
    if let Some(head) = document.head() {
        if let Ok(style) = document.create_element("style") {
            style.set_id(CONFETTI_STYLE_ID);
            style.set_text_content(Some(CONFETTI_CSS));
            let _ = head.append_child(&style);
        }
    }
}

/// Fire-and-forget confetti burst on reveal. Purely cosmetic: any failure
/// along the way just means fewer pieces on screen.
pub fn burst() {
    let window = match window() {
        Some(window) => window,
        None => return,
    };
    let document = match window.document() {
        Some(document) => document,
        None => return,
    };
    let body = match document.body() {
        Some(body) => body,
        None => return,
    };
    ensure_keyframes(&document);

    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let mut rng = rand::thread_rng();

    for _ in 0..CONFETTI_COUNT {
        let piece = match document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(piece) => piece,
            None => return,
        };

        let color = CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())];
        let fall_seconds = rng.gen_range(2.0..5.0);
        let fall_distance = rng.gen_range(0.0..viewport_height) + viewport_height;
        let spin = rng.gen_range(0.0..360.0);

        let style = piece.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("width", "10px");
        let _ = style.set_property("height", "10px");
        let _ = style.set_property("background-color", color);
        let _ = style.set_property("left", &format!("{}%", rng.gen_range(0.0..100.0)));
        let _ = style.set_property("top", "-10px");
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("z-index", "9999");
        let _ = style.set_property("border-radius", "50%");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("--fall-distance", &format!("{:.0}px", fall_distance));
        let _ = style.set_property("--fall-spin", &format!("{:.0}deg", spin));
        let _ = style.set_property(
            "animation",
            &format!(
                "confetti-fall {:.2}s cubic-bezier(0.25, 0.46, 0.45, 0.94) forwards",
                fall_seconds
            ),
        );

        let _ = body.append_child(&piece);

        Timeout::new((fall_seconds * 1000.0) as u32, move || {
            piece.remove();
        })
        .forget();
    }
}
