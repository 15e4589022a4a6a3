mod wheel_canvas;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::net::http::Request;
use gloo_timers::callback::Timeout;
use log::{error, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::constants::{RESTORED_POPUP_DELAY_MS, SPIN_ENDPOINT, WHEEL_RESULT_HEADING};
use shared::reveal_session::{RewardAssignment, WHEEL_SESSION};
use shared::shared_wheel_game::{WheelSpinResponse, WheelState};

use crate::base::open_whatsapp;
use crate::components::{confetti, RewardPopup};
use crate::config::get_api_base_url;
use crate::storage;
use crate::styles;

use wheel_canvas::WheelCanvas;

async fn fetch_spin() -> Result<WheelSpinResponse, String> {
    let url = format!("{}{}", get_api_base_url(), SPIN_ENDPOINT);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("network error: {:?}", e))?;
    if !response.ok() {
        return Err(format!("error status: {}", response.status()));
    }
    response
        .json::<WheelSpinResponse>()
        .await
        .map_err(|e| format!("error parsing spin response: {:?}", e))
}

#[function_component(SpinWheelPage)]
pub fn spin_wheel_page() -> Html {
    let offers = use_state(Vec::<String>::new);
    let rotation = use_state(|| 0.0f64);
    let is_spinning = use_state(|| false);
    let result = use_state(RewardAssignment::default);
    let already_spun = use_state(|| false);
    let show_popup = use_state(|| false);
    // Canonical spin state. The single-flight guard lives outside the render
    // cycle so two quick clicks cannot start two animations.
    let wheel = use_mut_ref(WheelState::new);

    // Session gate, then the initial offers fetch for the wheel face.
    {
        let offers = offers.clone();
        let result = result.clone();
        let already_spun = already_spun.clone();
        let show_popup = show_popup.clone();
        use_effect_with((), move |_| {
            if let Some(saved) = storage::load_session(&WHEEL_SESSION) {
                result.set(saved);
                already_spun.set(true);
                Timeout::new(RESTORED_POPUP_DELAY_MS, move || {
                    show_popup.set(true);
                })
                .forget();
            } else {
                spawn_local(async move {
                    match fetch_spin().await {
                        Ok(data) => {
                            result.set(RewardAssignment {
                                reward: String::new(),
                                module: data.module,
                                base_price: data.base_price,
                                email: data.email.unwrap_or_default(),
                            });
                            offers.set(data.offers);
                        }
                        // Leave the wheel blank and the spin button inert.
                        Err(err) => error!("offer fetch failed: {}", err),
                    }
                });
            }
            || ()
        });
    }

    let start_spin = {
        let offers = offers.clone();
        let rotation = rotation.clone();
        let is_spinning = is_spinning.clone();
        let result = result.clone();
        let already_spun = already_spun.clone();
        let show_popup = show_popup.clone();
        let wheel = wheel.clone();

        Callback::from(move |_: MouseEvent| {
            if wheel.borrow().spinning || *already_spun || offers.is_empty() {
                return;
            }

            let offers = offers.clone();
            let rotation = rotation.clone();
            let is_spinning = is_spinning.clone();
            let result = result.clone();
            let already_spun = already_spun.clone();
            let show_popup = show_popup.clone();
            let wheel = wheel.clone();

            spawn_local(async move {
                // The service picks the winning slice; the wheel only has to
                // land on it.
                let data = match fetch_spin().await {
                    Ok(data) => data,
                    Err(err) => {
                        error!("spin fetch failed: {}", err);
                        return;
                    }
                };
                if data.offers.is_empty() || data.index >= data.offers.len() {
                    warn!("spin response had no usable offers");
                    return;
                }

                let plan = match wheel.borrow_mut().start_spin(data.offers.len(), data.index) {
                    Some(plan) => plan,
                    // Another spin won the race; let it run.
                    None => return,
                };

                let won = RewardAssignment {
                    reward: data.offers[data.index].clone(),
                    module: data.module.clone(),
                    base_price: data.base_price,
                    email: data.email.clone().unwrap_or_default(),
                };
                offers.set(data.offers);
                is_spinning.set(true);

                let start_time = js_sys::Date::now();
                let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
                let scheduler = frame.clone();

                *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let elapsed = js_sys::Date::now() - start_time;
                    rotation.set(plan.angle_at(elapsed));

                    if !plan.is_complete(elapsed) {
                        if let Some(window) = web_sys::window() {
                            let _ = window.request_animation_frame(
                                scheduler.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                            );
                        }
                    } else {
                        {
                            let mut wheel_state = wheel.borrow_mut();
                            wheel_state.finish_spin(&plan);
                            rotation.set(wheel_state.angle);
                        }
                        is_spinning.set(false);
                        already_spun.set(true);
                        storage::save_session(&WHEEL_SESSION, &won);
                        result.set(won.clone());
                        confetti::burst();
                        show_popup.set(true);
                    }
                }) as Box<dyn FnMut()>));

                if let Some(window) = web_sys::window() {
                    let _ = window.request_animation_frame(
                        frame.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    );
                }
            });
        })
    };

    let send_to_whatsapp = {
        let result = result.clone();
        let show_popup = show_popup.clone();
        Callback::from(move |_: MouseEvent| {
            open_whatsapp(WHEEL_RESULT_HEADING, &result);
            show_popup.set(false);
        })
    };

    let spin_disabled = *is_spinning || *already_spun || offers.is_empty();
    let button_text = if *is_spinning {
        "SPINNING..."
    } else if *already_spun {
        "ALREADY SPUN"
    } else {
        "SPIN"
    };
    let instruction = if *already_spun {
        "You already spun the wheel! Send your offer to WhatsApp below."
    } else {
        "Hit spin to find out which offer is yours!"
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class="max-w-2xl mx-auto py-10">
                <div class={styles::CARD}>
                    <h1 class={classes!(styles::TEXT_H1, "text-center", "mb-2")}>
                        { "Spin & Win" }
                    </h1>
                    <p class={classes!(styles::TEXT_BODY, "text-center", "mb-6")}>
                        { instruction }
                    </p>

                    <div class="flex justify-center mb-8">
                        <WheelCanvas
                            offers={(*offers).clone()}
                            rotation={*rotation}
                            is_spinning={*is_spinning}
                        />
                    </div>

                    <div class="flex justify-center">
                        <div class="w-full max-w-[300px]">
                            <button
                                class={styles::SPIN_BUTTON}
                                disabled={spin_disabled}
                                onclick={start_spin}
                            >
                                { button_text }
                            </button>
                        </div>
                    </div>
                </div>
            </div>

            <RewardPopup
                visible={*show_popup}
                title={"🎉 You Won!".to_string()}
                details={format!("{} for {}", result.reward, result.module.to_uppercase())}
                on_send={send_to_whatsapp}
            />
        </div>
    }
}
