//! In-memory implementations of the platform traits.
//!
//! These record every call so rolls can be driven and inspected without a
//! page: the unit tests use them, and so does the headless tester.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Serialize;

use crate::audio::{AudioError, Cue};
use crate::card::{CardSlot, CardState};
use crate::catalog::{HttpResponse, TransportError};
use crate::roller::TriggerLabel;
use crate::{AudioCue, CardView, Transport, TriggerView};

/// One presentation change applied to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Image(String),
    Label(String),
    State(CardState),
}

/// What a card currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CardSnapshot {
    pub state: CardState,
    pub image: String,
    pub label: String,
}

#[derive(Debug)]
pub struct RecordingCard {
    slot: CardSlot,
    current: RefCell<CardSnapshot>,
    events: RefCell<Vec<ViewEvent>>,
}

impl RecordingCard {
    #[must_use]
    pub fn new(slot: CardSlot) -> Self {
        Self {
            slot,
            current: RefCell::new(CardSnapshot::default()),
            events: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn slot(&self) -> CardSlot {
        self.slot
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.current.borrow().state
    }

    #[must_use]
    pub fn image(&self) -> String {
        self.current.borrow().image.clone()
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.current.borrow().label.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    /// How many times the card entered `state`.
    #[must_use]
    pub fn entered(&self, state: CardState) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == ViewEvent::State(state))
            .count()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}

impl CardView for RecordingCard {
    fn set_image(&self, src: &str) {
        self.current.borrow_mut().image = src.to_string();
        self.events
            .borrow_mut()
            .push(ViewEvent::Image(src.to_string()));
    }

    fn set_label(&self, text: &str) {
        self.current.borrow_mut().label = text.to_string();
        self.events
            .borrow_mut()
            .push(ViewEvent::Label(text.to_string()));
    }

    fn set_state(&self, state: CardState) {
        self.current.borrow_mut().state = state;
        self.events.borrow_mut().push(ViewEvent::State(state));
    }
}

#[derive(Debug)]
pub struct RecordingTrigger {
    enabled: Cell<bool>,
    label: Cell<TriggerLabel>,
    history: RefCell<Vec<TriggerLabel>>,
}

impl Default for RecordingTrigger {
    fn default() -> Self {
        Self {
            enabled: Cell::new(false),
            label: Cell::new(TriggerLabel::Loading),
            history: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    #[must_use]
    pub fn label(&self) -> TriggerLabel {
        self.label.get()
    }

    /// Every label applied, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<TriggerLabel> {
        self.history.borrow().clone()
    }
}

impl TriggerView for RecordingTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn set_label(&self, label: TriggerLabel) {
        self.label.set(label);
        self.history.borrow_mut().push(label);
    }
}

/// Records cues; optionally rejects every playback like a browser that has
/// not seen a user gesture yet.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    played: RefCell<Vec<Cue>>,
    reject: bool,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            played: RefCell::new(Vec::new()),
            reject: true,
        }
    }

    /// Cues that were requested, in order, whether or not they played.
    #[must_use]
    pub fn played(&self) -> Vec<Cue> {
        self.played.borrow().clone()
    }
}

impl AudioCue for RecordingAudio {
    fn play(&self, cue: Cue) -> Result<(), AudioError> {
        self.played.borrow_mut().push(cue);
        if self.reject {
            return Err(AudioError::Rejected {
                cue,
                message: "playback requires a user gesture".to_string(),
            });
        }
        Ok(())
    }
}

/// Serves canned responses by exact URL. Unknown URLs fail at the
/// transport level.
#[derive(Debug, Default)]
pub struct StaticTransport {
    routes: HashMap<String, (u16, String)>,
    requested: RefCell<Vec<String>>,
}

impl StaticTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ok(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    #[must_use]
    pub fn with_status(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.routes.insert(url.into(), (status, body.into()));
        self
    }

    /// URLs requested so far, in request order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Transport for StaticTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requested.borrow_mut().push(url.to_string());
        self.routes
            .get(url)
            .map(|(status, body)| HttpResponse::new(url, *status, body.clone()))
            .ok_or_else(|| TransportError(format!("no route for {url}")))
    }
}
