use std::cell::RefCell;
use std::rc::Rc;

use log::error;
use loadout_core::{CardDeck, Roller};
use yew::prelude::*;

use crate::config::{catalog_source, roll_pacing};
use crate::dom::DomError;
use crate::platform::{BrowserClock, FetchTransport, entropy_seed};
use crate::views::{DomAudio, DomCard, DomTrigger};

pub type WebRoller = Roller<DomCard, DomTrigger, DomAudio, BrowserClock>;

/// Shared slot for the page's roller; empty until the shell has mounted.
pub type RollerHandle = Rc<RefCell<Option<Rc<WebRoller>>>>;

/// Bind the roller to the rendered shell and start the catalog load once
/// after the first render.
#[hook]
pub fn use_roller() -> RollerHandle {
    let roller: RollerHandle = use_mut_ref(|| None);
    {
        let roller = roller.clone();
        use_effect_with((), move |()| {
            start(&roller);
            || ()
        });
    }
    roller
}

/// Build a roller over the page's elements.
///
/// # Errors
/// Returns a [`DomError`] if a card or the roll button is missing.
pub fn bind_roller() -> Result<WebRoller, DomError> {
    let cards = CardDeck::try_bind(DomCard::bind)?;
    let trigger = DomTrigger::bind()?;
    Ok(Roller::new(cards, trigger, DomAudio::bind(), BrowserClock, entropy_seed())
        .with_pacing(roll_pacing())
        .with_source(catalog_source()))
}

fn start(handle: &RollerHandle) {
    let roller = match bind_roller() {
        Ok(roller) => Rc::new(roller),
        Err(err) => {
            error!("Loadout page is incomplete: {err}");
            return;
        }
    };
    *handle.borrow_mut() = Some(Rc::clone(&roller));
    wasm_bindgen_futures::spawn_local(async move {
        // Failures are logged and shown on the trigger by the roller.
        let _ = roller.load(&FetchTransport).await;
    });
}

/// Start a roll if the roller is ready. Clicks during a roll are dropped by
/// the roller itself.
pub fn spawn_roll(handle: &RollerHandle) {
    let Some(roller) = handle.borrow().clone() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        roller.handle_roll().await;
    });
}
