use yew::prelude::*;
use yew_router::prelude::*;

use crate::styles;
use crate::Route;

/// Landing page: pick one of the two reveal games. Each browser session
/// gets one reveal per game, so the choice is mostly a matter of taste.
#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class={styles::CONTAINER}>
            <div class="max-w-2xl mx-auto py-16 text-center">
                <h1 class={classes!(styles::TEXT_H1, "mb-2")}>
                    { "Choose Your Offer" }
                </h1>
                <p class={classes!(styles::TEXT_BODY, "mb-10")}>
                    { "Try your luck — every play wins something!" }
                </p>
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-6">
                    <Link<Route> to={Route::Wheel} classes={classes!(styles::CARD_HOVER)}>
                        <div class="text-5xl mb-4">{ "🎡" }</div>
                        <h2 class="text-xl font-bold text-gray-900 dark:text-white mb-2">
                            { "Spin the Wheel" }
                        </h2>
                        <p class={styles::TEXT_SMALL}>
                            { "One spin, one guaranteed offer" }
                        </p>
                    </Link<Route>>
                    <Link<Route> to={Route::Scratch} classes={classes!(styles::CARD_HOVER)}>
                        <div class="text-5xl mb-4">{ "🪙" }</div>
                        <h2 class="text-xl font-bold text-gray-900 dark:text-white mb-2">
                            { "Scratch Card" }
                        </h2>
                        <p class={styles::TEXT_SMALL}>
                            { "Scratch the silver layer to reveal your offer" }
                        </p>
                    </Link<Route>>
                </div>
            </div>
        </div>
    }
}
