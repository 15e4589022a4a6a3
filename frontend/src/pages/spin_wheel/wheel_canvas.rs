use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use shared::constants::{
    LABEL_LINE_HEIGHT, LABEL_MAX_WIDTH, WHEEL_CANVAS_SIZE, WHEEL_CENTER, WHEEL_HUB_RADIUS,
    WHEEL_RADIUS,
};
use shared::shared_wheel_game::{slice_hue, slice_width};

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub offers: Vec<String>,
    pub rotation: f64,
    pub is_spinning: bool,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let offers = props.offers.clone();
        let rotation = props.rotation;

        use_effect_with((offers, rotation), move |(offers, rotation)| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Ok(Some(context)) = canvas.get_context("2d") {
                    if let Ok(context) = context.dyn_into::<CanvasRenderingContext2d>() {
                        draw_wheel(&context, offers, *rotation);
                    }
                }
            }
            || ()
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={WHEEL_CANVAS_SIZE.to_string()}
            height={WHEEL_CANVAS_SIZE.to_string()}
            class="w-full max-w-[550px] h-auto"
            style={if props.is_spinning {
                "filter: drop-shadow(0px 5px 20px rgba(249, 115, 22, 0.4));"
            } else {
                "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
            }}
        />
    }
}

fn draw_wheel(context: &CanvasRenderingContext2d, offers: &[String], angle: f64) {
    let size = WHEEL_CANVAS_SIZE as f64;
    context.clear_rect(0.0, 0.0, size, size);
    if offers.is_empty() {
        return;
    }

    let slice = slice_width(offers.len());

    for (i, offer) in offers.iter().enumerate() {
        let start = angle + i as f64 * slice;
        let end = start + slice;

        context.begin_path();
        context.move_to(WHEEL_CENTER, WHEEL_CENTER);
        let _ = context.arc(WHEEL_CENTER, WHEEL_CENTER, WHEEL_RADIUS, start, end);
        context.set_fill_style_str(&format!("hsl({}, 70%, 50%)", slice_hue(i, offers.len())));
        context.fill();
        context.set_stroke_style_str("white");
        context.set_line_width(3.0);
        context.stroke();

        // Label along the slice bisector, reading outward from the rim.
        context.save();
        let _ = context.translate(WHEEL_CENTER, WHEEL_CENTER);
        let _ = context.rotate(start + slice / 2.0);
        context.set_text_align("right");
        context.set_fill_style_str("white");
        context.set_font("bold 16px Arial");
        context.set_shadow_color("rgba(0,0,0,0.5)");
        context.set_shadow_blur(3.0);
        wrap_text(
            context,
            offer,
            WHEEL_RADIUS - 20.0,
            -10.0,
            LABEL_MAX_WIDTH,
            LABEL_LINE_HEIGHT,
        );
        context.restore();
    }

    // Center hub
    context.begin_path();
    let _ = context.arc(WHEEL_CENTER, WHEEL_CENTER, WHEEL_HUB_RADIUS, 0.0, 2.0 * PI);
    context.set_fill_style_str("white");
    context.fill();
    context.set_stroke_style_str("#333");
    context.set_line_width(3.0);
    context.stroke();

    draw_pointer(context);
}

/// The fixed win pointer at the top of the canvas. The spin plan lands the
/// chosen slice's center directly under its tip.
fn draw_pointer(context: &CanvasRenderingContext2d) {
    let tip_y = WHEEL_CENTER - WHEEL_RADIUS + 10.0;

    context.begin_path();
    context.move_to(WHEEL_CENTER, tip_y);
    context.line_to(WHEEL_CENTER - 15.0, tip_y - 35.0);
    context.line_to(WHEEL_CENTER + 15.0, tip_y - 35.0);
    context.close_path();
    context.set_fill_style_str("#f59e0b");
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
}

/// Word-wraps a label to the given pixel width and draws one line per row.
fn wrap_text(
    context: &CanvasRenderingContext2d,
    text: &str,
    x: f64,
    y: f64,
    max_width: f64,
    line_height: f64,
) {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for (i, word) in text.split(' ').enumerate() {
        let test_line = format!("{}{} ", line, word);
        let width = context
            .measure_text(&test_line)
            .map(|m| m.width())
            .unwrap_or(0.0);
        if width > max_width && i > 0 {
            lines.push(line);
            line = format!("{} ", word);
        } else {
            line = test_line;
        }
    }
    lines.push(line);

    for (i, l) in lines.iter().enumerate() {
        let _ = context.fill_text(l.trim(), x, y + i as f64 * line_height);
    }
}
