pub mod base;
pub mod components;
pub mod config;
pub mod pages;
pub mod storage;
pub mod styles;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{home::Home, scratch_card::ScratchCardPage, spin_wheel::SpinWheelPage};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/scratch")]
    Scratch,
    #[at("/wheel")]
    Wheel,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full">
                <div class="mx-auto">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Scratch => html! { <ScratchCardPage /> },
        Route::Wheel => html! { <SpinWheelPage /> },
    }
}
