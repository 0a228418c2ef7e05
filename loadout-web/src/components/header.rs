use yew::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header role="banner" class="text-center py-6">
            <h1 class="text-4xl font-black tracking-widest text-yellow-400 uppercase">
                { "Helldivers 2 Loadout Roller" }
            </h1>
            <p class="text-zinc-400 text-sm">{ "Let Super Earth choose your gear." }</p>
        </header>
    }
}
