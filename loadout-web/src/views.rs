//! DOM-backed card, trigger and audio views.
//!
//! The yew shell renders the markup once; after that a roll mutates the
//! elements directly through these views, toggling the Tailwind classes that
//! carry each card state.
use log::warn;
use loadout_core::{AudioCue, AudioError, CardSlot, CardState, CardView, Cue, TriggerLabel, TriggerView};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlAudioElement, HtmlButtonElement, HtmlImageElement};

use crate::dom::{DomError, element_by_id, js_error_message};

pub const ROLL_BUTTON_ID: &str = "roll-button";

/// Classes set on the trigger once loading fails.
pub const TRIGGER_ERROR_CLASSES: [&str; 2] = ["!bg-red-600", "!text-white"];

/// Classes to drop from and then add to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassToggle {
    pub remove: &'static [&'static str],
    pub add: &'static [&'static str],
}

impl ClassToggle {
    const NONE: Self = Self {
        remove: &[],
        add: &[],
    };

    /// # Errors
    /// Returns the browser's error if the class list rejects a token.
    pub fn apply(&self, element: &Element) -> Result<(), JsValue> {
        let classes = element.class_list();
        for class in self.remove {
            classes.remove_1(class)?;
        }
        for class in self.add {
            classes.add_1(class)?;
        }
        Ok(())
    }
}

/// Class changes for the card container, image and label on entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardClasses {
    pub card: ClassToggle,
    pub image: ClassToggle,
    pub label: ClassToggle,
}

#[must_use]
pub const fn card_classes(state: CardState) -> CardClasses {
    match state {
        CardState::Idle => CardClasses {
            card: ClassToggle {
                remove: &["border-yellow-400"],
                add: &["border-zinc-700"],
            },
            image: ClassToggle {
                remove: &[],
                add: &["filter", "grayscale"],
            },
            label: ClassToggle {
                remove: &["text-white"],
                add: &["text-zinc-400"],
            },
        },
        CardState::Spinning => CardClasses {
            card: ClassToggle {
                remove: &[],
                add: &["border-yellow-400/50", "animate-pulse"],
            },
            image: ClassToggle {
                remove: &[],
                add: &["blur-sm", "scale-90"],
            },
            label: ClassToggle::NONE,
        },
        CardState::Revealed => CardClasses {
            card: ClassToggle {
                remove: &["border-yellow-400/50", "animate-pulse", "border-zinc-700"],
                add: &["border-yellow-400"],
            },
            image: ClassToggle {
                remove: &["filter", "grayscale", "blur-sm", "scale-90"],
                add: &[],
            },
            label: ClassToggle {
                remove: &["text-zinc-400"],
                add: &["text-white"],
            },
        },
    }
}

/// A card bound to its container, image and label elements.
pub struct DomCard {
    slot: CardSlot,
    container: Element,
    image: HtmlImageElement,
    label: Element,
}

impl DomCard {
    /// # Errors
    /// Returns a [`DomError`] if any of the card's elements is missing.
    pub fn bind(slot: CardSlot) -> Result<Self, DomError> {
        Ok(Self {
            slot,
            container: element_by_id(&slot.container_id())?,
            image: element_by_id(&slot.image_id())?,
            label: element_by_id(&slot.label_id())?,
        })
    }

    #[must_use]
    pub const fn slot(&self) -> CardSlot {
        self.slot
    }
}

impl CardView for DomCard {
    fn set_image(&self, src: &str) {
        self.image.set_src(src);
    }

    fn set_label(&self, text: &str) {
        self.label.set_text_content(Some(text));
    }

    fn set_state(&self, state: CardState) {
        let classes = card_classes(state);
        let applied = classes
            .card
            .apply(&self.container)
            .and_then(|()| classes.image.apply(&self.image))
            .and_then(|()| classes.label.apply(&self.label));
        if let Err(err) = applied {
            warn!(
                "Could not style {:?} as {state:?}: {}",
                self.slot,
                js_error_message(&err)
            );
        }
    }
}

pub struct DomTrigger {
    button: HtmlButtonElement,
}

impl DomTrigger {
    /// # Errors
    /// Returns a [`DomError`] if the roll button is missing.
    pub fn bind() -> Result<Self, DomError> {
        Ok(Self {
            button: element_by_id(ROLL_BUTTON_ID)?,
        })
    }
}

impl TriggerView for DomTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.button.set_disabled(!enabled);
    }

    fn set_label(&self, label: TriggerLabel) {
        self.button.set_text_content(Some(label.text()));
        if label.is_error() {
            let classes = self.button.class_list();
            for class in TRIGGER_ERROR_CLASSES {
                if let Err(err) = classes.add_1(class) {
                    warn!("Could not style trigger: {}", js_error_message(&err));
                }
            }
        }
    }
}

/// The page's two `<audio>` elements. Either may be absent.
pub struct DomAudio {
    deploy: Option<HtmlAudioElement>,
    success: Option<HtmlAudioElement>,
}

impl DomAudio {
    #[must_use]
    pub fn bind() -> Self {
        Self {
            deploy: bind_audio(Cue::Deploy),
            success: bind_audio(Cue::Success),
        }
    }

    const fn element(&self, cue: Cue) -> Option<&HtmlAudioElement> {
        match cue {
            Cue::Deploy => self.deploy.as_ref(),
            Cue::Success => self.success.as_ref(),
        }
    }
}

fn bind_audio(cue: Cue) -> Option<HtmlAudioElement> {
    element_by_id(cue.element_id())
        .map_err(|err| warn!("{err}; {cue:?} cue will be silent"))
        .ok()
}

impl AudioCue for DomAudio {
    fn play(&self, cue: Cue) -> Result<(), AudioError> {
        let audio = self.element(cue).ok_or(AudioError::Unavailable(cue))?;
        audio.set_current_time(0.0);
        let promise = audio.play().map_err(|err| AudioError::Rejected {
            cue,
            message: js_error_message(&err),
        })?;
        // Autoplay rejections arrive asynchronously.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                let err = AudioError::Rejected {
                    cue,
                    message: js_error_message(&err),
                };
                warn!("Sound play failed. User interaction might be needed. {err}");
            }
        });
        Ok(())
    }
}
