use loadout_core::{CardSlot, Cue, TriggerLabel};
use yew::prelude::*;

use crate::components::button::RollButton;
use crate::components::card::{LoadoutCard, slot_title};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::paths::cue_path;

pub mod bootstrap;

pub use bootstrap::WebRoller;

#[function_component(App)]
pub fn app() -> Html {
    let roller = bootstrap::use_roller();

    let onclick = {
        let roller = roller.clone();
        Callback::from(move |_: MouseEvent| bootstrap::spawn_roll(&roller))
    };

    let card = |slot: CardSlot| {
        html! { <LoadoutCard key={slot.stem()} {slot} title={slot_title(slot)} /> }
    };

    html! {
        <main id="main" class="min-h-screen bg-zinc-950 text-white flex flex-col items-center gap-8 px-4">
            <Header />
            <section aria-label="Weapons" class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full max-w-4xl">
                { for CardSlot::ALL[..3].iter().copied().map(card) }
            </section>
            <section aria-label="Stratagems" class="grid grid-cols-2 sm:grid-cols-4 gap-4 w-full max-w-4xl">
                { for CardSlot::ALL[3..].iter().copied().map(card) }
            </section>
            <RollButton label={TriggerLabel::Loading} disabled={true} {onclick} />
            <audio id={Cue::Deploy.element_id()} src={cue_path(Cue::Deploy)} preload="auto" />
            <audio id={Cue::Success.element_id()} src={cue_path(Cue::Success)} preload="auto" />
            <Footer />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn shell_renders_every_bound_element() {
        let html = block_on(LocalServerRenderer::<App>::new().render());
        for slot in CardSlot::ALL {
            assert!(html.contains(&slot.container_id()), "{slot:?}");
            assert!(html.contains(&slot.image_id()), "{slot:?}");
            assert!(html.contains(&slot.label_id()), "{slot:?}");
        }
        assert!(html.contains("roll-button"));
        assert!(html.contains("deploy-sound"));
        assert!(html.contains("success-sound"));
        assert!(html.contains("/static/assets/audio/success.mp3"));
    }
}
