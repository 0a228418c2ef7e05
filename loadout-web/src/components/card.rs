use loadout_core::CardSlot;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub slot: CardSlot,
    pub title: AttrValue,
}

/// One loadout card in its idle presentation.
#[function_component(LoadoutCard)]
pub fn loadout_card(p: &Props) -> Html {
    let slot = p.slot;
    html! {
        <div
            id={slot.container_id()}
            class="flex flex-col items-center gap-2 p-4 bg-zinc-900 border-2 border-zinc-700 rounded transition-all duration-200"
        >
            <span class="text-xs tracking-widest text-yellow-400 uppercase">{ p.title.clone() }</span>
            <img
                id={slot.image_id()}
                class="w-24 h-24 object-contain filter grayscale transition-all duration-75"
                alt={p.title.clone()}
                src=""
            />
            <span id={slot.label_id()} class="text-sm font-bold text-center text-zinc-400">
                { "???" }
            </span>
        </div>
    }
}

/// Heading shown above a card.
#[must_use]
pub fn slot_title(slot: CardSlot) -> String {
    match slot {
        CardSlot::Primary => "Primary".to_string(),
        CardSlot::Secondary => "Secondary".to_string(),
        CardSlot::Grenade => "Grenade".to_string(),
        CardSlot::Stratagem(i) => format!("Stratagem {}", u16::from(i) + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn card_renders_bound_ids() {
        let props = Props {
            slot: CardSlot::Stratagem(2),
            title: AttrValue::from(slot_title(CardSlot::Stratagem(2))),
        };
        let html = block_on(LocalServerRenderer::<LoadoutCard>::with_props(props).render());
        assert!(html.contains("id=\"stratagem-card-2\""));
        assert!(html.contains("id=\"stratagem-img-2\""));
        assert!(html.contains("id=\"stratagem-name-2\""));
        assert!(html.contains("Stratagem 3"));
        assert!(html.contains("grayscale"));
    }
}
