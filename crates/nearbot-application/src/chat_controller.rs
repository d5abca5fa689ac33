//! Chat submission control flow.
//!
//! Owns the transcript, the map view, the geolocation provider, the
//! backend handle, and the surface sink. Per submission: append the user
//! message (skipped when auto-triggered), show a typing placeholder,
//! acquire location, call the backend, clear the placeholder, then render
//! text, store cards, and map updates from the reply.

use std::sync::Arc;

use nearbot_core::chat::{ChatBackend, ChatEvent, ChatMessage, ChatSurface, Transcript};
use nearbot_core::geo::Location;
use nearbot_core::store::Store;
use nearbot_interaction::{GeoFix, GeoProvider};

use crate::map_view::MapView;

pub const TYPING_LABEL: &str = "AI is typing...";
pub const LOCATING_LABEL: &str = "Locating you...";
/// User bubble appended by a manual location check.
pub const LOCATION_PROMPT: &str = "My location";
pub const LOCATION_ALERT: &str =
    "Unable to determine your location. Please allow location access or type an address.";
pub const LOCATION_FAILURE_REPLY: &str =
    "Could not determine your location. Try again or type a specific address.";

/// The chat use case.
pub struct ChatController {
    transcript: Transcript,
    map: MapView,
    geo: GeoProvider,
    backend: Arc<dyn ChatBackend>,
    surface: Arc<dyn ChatSurface>,
    /// Stores from the most recent reply, addressable by card index.
    store_cards: Vec<Store>,
}

impl ChatController {
    pub fn new(
        geo: GeoProvider,
        backend: Arc<dyn ChatBackend>,
        surface: Arc<dyn ChatSurface>,
    ) -> Self {
        Self {
            transcript: Transcript::new(),
            map: MapView::new(),
            geo,
            backend,
            surface,
            store_cards: Vec::new(),
        }
    }

    /// Acquires an initial fix on startup so the map starts on the user.
    pub async fn prime_location(&mut self) {
        self.acquire_location().await;
    }

    /// Handles one user-typed message.
    pub async fn send_message(&mut self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }

        self.append(ChatMessage::user(message));
        self.show_typing(TYPING_LABEL);

        // Latest location before sending
        let location = self.acquire_location().await;
        let reply = self.backend.ask(message, location).await;

        self.clear_typing();

        if !reply.trigger_location {
            self.append(ChatMessage::assistant(reply.text.clone()));
        }

        if let Some(map_data) = &reply.map_data
            && !map_data.store_markers.is_empty()
        {
            self.store_cards = map_data.store_markers.clone();
            self.surface
                .on_event(ChatEvent::StoreCards(self.store_cards.clone()));
            self.map.render(map_data.user_marker, &map_data.store_markers);
            self.surface.on_event(ChatEvent::MapUpdated);
        }

        if reply.trigger_location {
            self.location_check(true).await;
        }
    }

    /// Location-check flow.
    ///
    /// Auto-triggered mode (backend requested it) appends no user bubble;
    /// the manual flow does. Both show a locating placeholder and report
    /// the resolved coordinates or a failure message.
    pub async fn location_check(&mut self, auto_triggered: bool) {
        if !auto_triggered {
            self.append(ChatMessage::user(LOCATION_PROMPT));
        }

        self.show_typing(LOCATING_LABEL);
        let location = self.acquire_location().await;
        self.clear_typing();

        match location {
            Some(loc) => self.append(ChatMessage::assistant(format!(
                "Found your location: lat {}, lng {}. What can I help you find nearby?",
                loc.lat, loc.lng
            ))),
            None => self.append(ChatMessage::assistant(LOCATION_FAILURE_REPLY)),
        }
    }

    /// Refocuses the map on a previously listed store card.
    ///
    /// Returns whether the index named a card.
    pub fn focus_card(&mut self, index: usize) -> bool {
        let Some(store) = self.store_cards.get(index) else {
            return false;
        };
        let (lat, lng) = (store.lat, store.lng);
        self.map.focus(lat, lng);
        self.surface.on_event(ChatEvent::MapUpdated);
        true
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn store_cards(&self) -> &[Store] {
        &self.store_cards
    }

    /// Resolves a location, mirroring a fresh fix onto the map.
    async fn acquire_location(&mut self) -> Option<Location> {
        match self.geo.acquire().await {
            GeoFix::Fresh(location) => {
                self.map.render(Some(location), &[]);
                self.surface.on_event(ChatEvent::MapUpdated);
                Some(location)
            }
            GeoFix::Cached(location) => Some(location),
            GeoFix::Unavailable { should_alert } => {
                if should_alert {
                    self.surface
                        .on_event(ChatEvent::Alert(LOCATION_ALERT.to_string()));
                }
                None
            }
        }
    }

    fn append(&mut self, message: ChatMessage) {
        self.transcript.push(message.clone());
        self.surface.on_event(ChatEvent::MessageAppended(message));
    }

    fn show_typing(&mut self, label: &str) {
        self.transcript.show_typing(label);
        self.surface
            .on_event(ChatEvent::TypingStarted(label.to_string()));
    }

    fn clear_typing(&mut self) {
        if self.transcript.clear_typing() {
            self.surface.on_event(ChatEvent::TypingCleared);
        }
    }
}
