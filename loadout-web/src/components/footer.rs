use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="text-center text-xs text-zinc-500 py-4">
            { "Item data and icons from the community helldivers-2-database." }
        </footer>
    }
}
