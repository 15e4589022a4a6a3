use std::f64::consts::PI;

use gloo::events::EventListener;
use gloo::net::http::Request;
use gloo_timers::callback::Timeout;
use log::{error, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent,
    TouchEvent,
};
use yew::prelude::*;

use shared::constants::{
    BRUSH_RADIUS, RESTORED_POPUP_DELAY_MS, REVEAL_POPUP_DELAY_MS, SCRATCH_CANVAS_HEIGHT,
    SCRATCH_CANVAS_HEIGHT_SMALL, SCRATCH_CANVAS_WIDTH, SCRATCH_CANVAS_WIDTH_SMALL,
    SCRATCH_RESULT_HEADING, SCRATCH_REVEAL_ENDPOINT, SMALL_SCREEN_BREAKPOINT,
};
use shared::reveal_session::{RewardAssignment, SCRATCH_SESSION};
use shared::shared_scratch_game::{
    revealed_fraction, to_canvas_coords, ScratchCard, ScratchRevealResponse,
};

use crate::base::open_whatsapp;
use crate::components::{confetti, RewardPopup};
use crate::config::get_api_base_url;
use crate::storage;
use crate::styles;

pub enum Msg {
    Assignment(ScratchRevealResponse),
    FetchFailed(String),
    StrokeStart,
    StrokeEnd,
    Scratch { client_x: f64, client_y: f64 },
    ShowPopup,
    SendToWhatsApp,
    ViewportResized,
}

/// The scratch-card widget. The canvas holds the silver mask; the reward
/// text sits in the DOM underneath and shows through wherever the mask has
/// been erased.
pub struct ScratchCardPage {
    canvas_ref: NodeRef,
    card: ScratchCard,
    result: RewardAssignment,
    restored: bool,
    show_popup: bool,
    mask_drawn: bool,
    _touch_listeners: Vec<Closure<dyn FnMut(TouchEvent)>>,
    _resize_listener: Option<EventListener>,
}

impl Component for ScratchCardPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut card = ScratchCard::new();
        let mut result = RewardAssignment::default();

        // Session gate: a reveal that already happened this session is
        // restored as-is, with no new fetch and no interactive phase.
        let restored = match storage::load_session(&SCRATCH_SESSION) {
            Some(saved) => {
                result = saved;
                card.restore_revealed();
                let link = ctx.link().clone();
                Timeout::new(RESTORED_POPUP_DELAY_MS, move || {
                    link.send_message(Msg::ShowPopup);
                })
                .forget();
                true
            }
            None => {
                fetch_assignment(ctx);
                false
            }
        };

        let resize_listener = window().map(|w| {
            let link = ctx.link().clone();
            EventListener::new(&w, "resize", move |_| {
                link.send_message(Msg::ViewportResized);
            })
        });

        Self {
            canvas_ref: NodeRef::default(),
            card,
            result,
            restored,
            show_popup: false,
            mask_drawn: false,
            _touch_listeners: Vec::new(),
            _resize_listener: resize_listener,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if self.restored || !first_render || self.mask_drawn {
            return;
        }
        if let Some((canvas, _)) = self.canvas_context() {
            if viewport_width() <= SMALL_SCREEN_BREAKPOINT {
                canvas.set_width(SCRATCH_CANVAS_WIDTH_SMALL);
                canvas.set_height(SCRATCH_CANVAS_HEIGHT_SMALL);
            }
        }
        self.draw_mask();
        self.mask_drawn = true;
        self.attach_touch_listeners(ctx);
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Assignment(data) => {
                // The mask is already on screen; this just fills in the
                // reward text hiding underneath it.
                self.result = RewardAssignment {
                    reward: data.reward,
                    module: data.module,
                    base_price: data.base_price,
                    email: data.email.unwrap_or_default(),
                };
                true
            }
            Msg::FetchFailed(err) => {
                // Degrade to a blank reward; the card itself stays usable.
                error!("reward fetch failed: {}", err);
                false
            }
            Msg::StrokeStart => {
                self.card.begin_stroke();
                false
            }
            Msg::StrokeEnd => {
                self.card.end_stroke();
                false
            }
            Msg::Scratch { client_x, client_y } => self.scratch_at(ctx, client_x, client_y),
            Msg::ShowPopup => {
                self.show_popup = true;
                true
            }
            Msg::SendToWhatsApp => {
                open_whatsapp(SCRATCH_RESULT_HEADING, &self.result);
                self.show_popup = false;
                true
            }
            Msg::ViewportResized => {
                self.resize_for_viewport();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let instruction = if self.restored {
            "You already scratched! Click below to send your offer to WhatsApp."
        } else {
            "Scratch the silver layer with your finger or mouse to reveal your offer!"
        };

        html! {
            <div class={styles::CONTAINER}>
                <div class="max-w-xl mx-auto py-10">
                    <div class={styles::CARD}>
                        <h1 class={classes!(styles::TEXT_H1, "text-center", "mb-2")}>
                            { "Scratch & Win" }
                        </h1>
                        <p class={classes!(styles::TEXT_BODY, "text-center", "mb-6")}>
                            { instruction }
                        </p>

                        <div class="relative mx-auto max-w-[400px]">
                            <div class="absolute inset-0 flex items-center justify-center rounded-xl bg-gradient-to-br from-purple-600 to-indigo-700">
                                <span class="text-2xl font-bold text-white text-center px-4">
                                    { &self.result.reward }
                                </span>
                            </div>
                            if !self.restored {
                                <canvas
                                    ref={self.canvas_ref.clone()}
                                    width={SCRATCH_CANVAS_WIDTH.to_string()}
                                    height={SCRATCH_CANVAS_HEIGHT.to_string()}
                                    class="relative w-full h-auto rounded-xl touch-none cursor-pointer"
                                    onmousedown={ctx.link().callback(|_| Msg::StrokeStart)}
                                    onmouseup={ctx.link().callback(|_| Msg::StrokeEnd)}
                                    onmouseleave={ctx.link().callback(|_| Msg::StrokeEnd)}
                                    onmousemove={ctx.link().callback(|e: MouseEvent| Msg::Scratch {
                                        client_x: e.client_x() as f64,
                                        client_y: e.client_y() as f64,
                                    })}
                                />
                            } else {
                                // Keep the reveal area at its normal height.
                                <div class="relative w-full" style="padding-top: 62.5%;"></div>
                            }
                        </div>
                    </div>
                </div>

                <RewardPopup
                    visible={self.show_popup}
                    title={"🎉 You Won!".to_string()}
                    details={format!("You won {} for {}!", self.result.reward, self.result.module)}
                    on_send={ctx.link().callback(|_| Msg::SendToWhatsApp)}
                />
            </div>
        }
    }
}

impl ScratchCardPage {
    fn canvas_context(&self) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = self.canvas_ref.cast::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some((canvas, context))
    }

    /// Paints the silver scratch layer over the whole canvas.
    fn draw_mask(&self) {
        let Some((canvas, context)) = self.canvas_context() else {
            return;
        };
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;

        let _ = context.set_global_composite_operation("source-over");
        let gradient = context.create_linear_gradient(0.0, 0.0, width, height);
        let _ = gradient.add_color_stop(0.0, "#C0C0C0");
        let _ = gradient.add_color_stop(0.5, "#E8E8E8");
        let _ = gradient.add_color_stop(1.0, "#C0C0C0");
        context.set_fill_style_canvas_gradient(&gradient);
        context.fill_rect(0.0, 0.0, width, height);

        context.set_fill_style_str("#333");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        context.set_font("bold 30px Arial");
        let _ = context.fill_text("SCRATCH HERE", width / 2.0, height / 2.0 - 20.0);
        context.set_font("bold 40px Arial");
        let _ = context.fill_text("🎁", width / 2.0, height / 2.0 + 30.0);
    }

    /// Erases one brush disc at the pointer position, then rechecks how much
    /// of the mask is gone. The full-buffer alpha scan runs once per gesture
    /// sample, which is bounded by the pointer-move event rate.
    fn scratch_at(&mut self, ctx: &Context<Self>, client_x: f64, client_y: f64) -> bool {
        if !self.card.is_scratching() {
            return false;
        }
        let Some((canvas, context)) = self.canvas_context() else {
            return false;
        };

        let rect = canvas.get_bounding_client_rect();
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        let (x, y) = to_canvas_coords(
            client_x,
            client_y,
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
            width,
            height,
        );

        let _ = context.set_global_composite_operation("destination-out");
        context.begin_path();
        let _ = context.arc(x, y, BRUSH_RADIUS, 0.0, 2.0 * PI);
        context.fill();

        let image = match context.get_image_data(0.0, 0.0, width, height) {
            Ok(image) => image,
            Err(_) => {
                warn!("could not read scratch mask pixels");
                return false;
            }
        };
        let fraction = revealed_fraction(&image.data().0);

        if self.card.register_fraction(fraction) {
            // Past the threshold the rest of the mask goes too.
            context.clear_rect(0.0, 0.0, width, height);
            storage::save_session(&SCRATCH_SESSION, &self.result);
            confetti::burst();
            let link = ctx.link().clone();
            Timeout::new(REVEAL_POPUP_DELAY_MS, move || {
                link.send_message(Msg::ShowPopup);
            })
            .forget();
            return true;
        }
        false
    }

    /// Touch needs `passive: false` listeners so `prevent_default` can stop
    /// the page from scrolling mid-scratch; Yew's declarative handlers
    /// cannot guarantee that, so these are attached by hand.
    fn attach_touch_listeners(&mut self, ctx: &Context<Self>) {
        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let link = ctx.link().clone();
        let touchstart = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            link.send_message(Msg::StrokeStart);
        }) as Box<dyn FnMut(TouchEvent)>);
        let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            touchstart.as_ref().unchecked_ref(),
            &options,
        );

        let link = ctx.link().clone();
        let touchmove = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            if let Some(touch) = e.touches().get(0) {
                link.send_message(Msg::Scratch {
                    client_x: touch.client_x() as f64,
                    client_y: touch.client_y() as f64,
                });
            }
        }) as Box<dyn FnMut(TouchEvent)>);
        let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            touchmove.as_ref().unchecked_ref(),
            &options,
        );

        let link = ctx.link().clone();
        let touchend = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            link.send_message(Msg::StrokeEnd);
        }) as Box<dyn FnMut(TouchEvent)>);
        let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchend",
            touchend.as_ref().unchecked_ref(),
            &options,
        );

        self._touch_listeners = vec![touchstart, touchmove, touchend];
    }

    /// On small viewports the canvas drops to its compact size and the mask
    /// is painted fresh, which also resets any scratching in progress.
    fn resize_for_viewport(&mut self) {
        if self.card.is_revealed() {
            return;
        }
        if viewport_width() > SMALL_SCREEN_BREAKPOINT {
            return;
        }
        if let Some((canvas, _)) = self.canvas_context() {
            canvas.set_width(SCRATCH_CANVAS_WIDTH_SMALL);
            canvas.set_height(SCRATCH_CANVAS_HEIGHT_SMALL);
            self.draw_mask();
        }
    }
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn fetch_assignment(ctx: &Context<ScratchCardPage>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let url = format!("{}{}", get_api_base_url(), SCRATCH_REVEAL_ENDPOINT);
        match Request::post(&url).send().await {
            Ok(response) if response.ok() => match response.json::<ScratchRevealResponse>().await {
                Ok(data) => link.send_message(Msg::Assignment(data)),
                Err(e) => link.send_message(Msg::FetchFailed(format!(
                    "error parsing reveal response: {:?}",
                    e
                ))),
            },
            Ok(response) => {
                link.send_message(Msg::FetchFailed(format!("error status: {}", response.status())))
            }
            Err(e) => link.send_message(Msg::FetchFailed(format!("network error: {:?}", e))),
        }
    });
}
