use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct RewardPopupProps {
    pub visible: bool,
    pub title: String,
    pub details: String,
    pub on_send: Callback<MouseEvent>,
}

/// Modal shown once a reward is revealed (or restored from the session),
/// with the WhatsApp handoff as its only action.
#[function_component(RewardPopup)]
pub fn reward_popup(props: &RewardPopupProps) -> Html {
    if !props.visible {
        return html! {};
    }

    html! {
        <div class={styles::POPUP_OVERLAY}>
            <div class={styles::POPUP_CARD}>
                <h2 class="text-2xl font-bold mb-2 text-gray-900 dark:text-white">
                    { &props.title }
                </h2>
                <p class="text-lg mb-6 text-gray-700 dark:text-gray-300">
                    { &props.details }
                </p>
                <button
                    onclick={props.on_send.clone()}
                    class="w-full px-6 py-3 rounded-full font-bold text-white bg-gradient-to-r from-green-500 to-green-600 hover:from-green-600 hover:to-green-700 shadow-lg transition-all duration-300"
                >
                    { "Send to WhatsApp 📲" }
                </button>
            </div>
        </div>
    }
}
