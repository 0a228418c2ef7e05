use loadout_core::TriggerLabel;
use yew::prelude::*;

use crate::views::ROLL_BUTTON_ID;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: TriggerLabel,
    #[prop_or(true)]
    pub disabled: bool,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

/// The roll trigger. Only the initial render comes from props; the roller
/// updates the element in place afterwards.
#[function_component(RollButton)]
pub fn roll_button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    html! {
        <button
            id={ROLL_BUTTON_ID}
            type="button"
            class="px-10 py-4 bg-yellow-400 text-black font-black tracking-widest uppercase rounded disabled:opacity-50 disabled:cursor-not-allowed hover:bg-yellow-300"
            disabled={p.disabled}
            {onclick}
        >
            { p.label.text() }
        </button>
    }
}
