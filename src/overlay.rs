//! DOM side of the overlay events: loading indicator, tooltip, artifact and
//! video modals, mute button, room title and minimap.

use crate::constants::*;
use crate::dom;
use crate::frame::Inbox;
use gallery_core::{EngineEvent, OverlayEvent, RoomId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct OverlayBridge {
    document: web::Document,
}

impl OverlayBridge {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn el(&self, id: &str) -> Option<web::Element> {
        self.document.get_element_by_id(id)
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.el(id) {
            dom::set_hidden(&el, !visible);
        }
    }

    pub fn apply(&self, event: &OverlayEvent) {
        match event {
            OverlayEvent::LoadingChanged(loading) => self.set_visible(LOADING_ID, *loading),
            OverlayEvent::Hover {
                title,
                screen_x,
                screen_y,
            } => self.tooltip(title.as_deref(), *screen_x, *screen_y),
            OverlayEvent::ArtifactSelected {
                title,
                image,
                description,
                has_audio_description,
            } => {
                dom::set_text(&self.document, ARTIFACT_TITLE_ID, title);
                dom::set_text(&self.document, ARTIFACT_DESCRIPTION_ID, description);
                if let Some(img) = dom::element::<web::HtmlImageElement>(&self.document, ARTIFACT_IMAGE_ID) {
                    img.set_src(image);
                    img.set_alt(title);
                }
                self.set_visible(DESCRIPTION_BUTTON_ID, *has_audio_description);
                dom::set_text(&self.document, DESCRIPTION_BUTTON_ID, DESCRIPTION_PLAY_LABEL);
                self.set_visible(ARTIFACT_MODAL_ID, true);
            }
            OverlayEvent::ArtifactClosed => self.set_visible(ARTIFACT_MODAL_ID, false),
            OverlayEvent::VideoSelected { source } => {
                if let Some(video) = dom::element::<web::HtmlVideoElement>(&self.document, VIDEO_PLAYER_ID) {
                    video.set_src(source);
                    if let Err(e) = video.play() {
                        log::warn!("[overlay] video play() threw: {:?}", e);
                    }
                }
                self.set_visible(VIDEO_MODAL_ID, true);
            }
            OverlayEvent::VideoClosed => {
                if let Some(video) = dom::element::<web::HtmlVideoElement>(&self.document, VIDEO_PLAYER_ID) {
                    _ = video.pause();
                    _ = video.remove_attribute("src");
                    video.load();
                }
                self.set_visible(VIDEO_MODAL_ID, false);
            }
            OverlayEvent::DescriptionChanged(playing) => {
                let label = if *playing {
                    DESCRIPTION_STOP_LABEL
                } else {
                    DESCRIPTION_PLAY_LABEL
                };
                dom::set_text(&self.document, DESCRIPTION_BUTTON_ID, label);
            }
            OverlayEvent::MuteChanged(muted) => {
                let label = if *muted { MUTE_ON_LABEL } else { MUTE_OFF_LABEL };
                dom::set_text(&self.document, MUTE_BUTTON_ID, label);
                if let Some(el) = self.el(MUTE_BUTTON_ID) {
                    _ = el.set_attribute("aria-pressed", if *muted { "true" } else { "false" });
                }
            }
            OverlayEvent::RoomChanged { room, title } => self.room_changed(room, title.as_deref()),
            OverlayEvent::LoadError { uri, reason } => {
                let msg = if uri.is_empty() {
                    reason.clone()
                } else {
                    format!("Could not load {uri}: {reason}")
                };
                self.show_error(&msg);
            }
            OverlayEvent::NavigationRejected { room, reason } => {
                log::warn!("[overlay] navigation to `{}` rejected: {}", room, reason);
            }
        }
    }

    fn tooltip(&self, title: Option<&str>, x: f32, y: f32) {
        let Some(el) = self.el(TOOLTIP_ID) else {
            return;
        };
        match title {
            Some(text) => {
                el.set_text_content(Some(text));
                dom::set_hidden(&el, false);
                _ = el.set_attribute("style", &format!("left:{x:.0}px;top:{y:.0}px"));
            }
            None => dom::set_hidden(&el, true),
        }
    }

    fn room_changed(&self, room: &RoomId, title: Option<&str>) {
        dom::set_text(&self.document, ROOM_TITLE_ID, title.unwrap_or(room.as_str()));
        if let Some(map) = self.el(MINIMAP_ID) {
            _ = map.set_attribute("data-current", room.as_str());
        }
        self.set_visible(ERROR_BANNER_ID, false);
    }

    pub fn show_error(&self, message: &str) {
        dom::set_text(&self.document, ERROR_BANNER_ID, message);
        self.set_visible(ERROR_BANNER_ID, true);
    }

    /// Rotate the minimap arrow with the view direction.
    pub fn set_heading(&self, theta: f32) {
        if let Some(el) = self.el(MINIMAP_INDICATOR_ID) {
            _ = el.set_attribute(
                "style",
                &format!("transform:translate(-50%,-50%) rotate({:.3}rad)", -theta),
            );
        }
    }
}

/// Buttons and room links that feed engine events.
pub fn wire_controls(document: &web::Document, inbox: &Inbox) {
    let wire = |id: &str, event: EngineEvent| {
        let inbox = inbox.clone();
        dom::add_click_listener(document, id, move || {
            inbox.borrow_mut().push(event.clone());
        });
    };
    wire(ARTIFACT_CLOSE_ID, EngineEvent::CloseArtifactOverlay);
    wire(DESCRIPTION_BUTTON_ID, EngineEvent::ToggleAudioDescription);
    wire(VIDEO_CLOSE_ID, EngineEvent::CloseVideoOverlay);
    wire(MUTE_BUTTON_ID, EngineEvent::ToggleMute);
    wire_room_links(document, inbox);
}

fn wire_room_links(document: &web::Document, inbox: &Inbox) {
    let Ok(links) = document.query_selector_all(ROOM_LINK_SELECTOR) else {
        return;
    };
    for i in 0..links.length() {
        let Some(el) = links.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let Some(room) = el.get_attribute(ROOM_ATTR) else {
            continue;
        };
        let inbox = inbox.clone();
        let on_click = Closure::wrap(Box::new(move || {
            inbox
                .borrow_mut()
                .push(EngineEvent::Navigate(RoomId::new(room.clone())));
        }) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}

/// Start gate: the first click unlocks media playback and enters the
/// initial room. Without a gate element the gallery starts immediately.
pub fn wire_start_gate(document: &web::Document, inbox: &Inbox, initial: RoomId) -> bool {
    let Some(gate) = document.get_element_by_id(START_OVERLAY_ID) else {
        return false;
    };
    if document.get_element_by_id(START_BUTTON_ID).is_none() {
        return false;
    }
    dom::set_hidden(&gate, false);
    let inbox = inbox.clone();
    let mut started = false;
    dom::add_click_listener(document, START_BUTTON_ID, move || {
        if started {
            return;
        }
        started = true;
        dom::set_hidden(&gate, true);
        inbox.borrow_mut().push(EngineEvent::Navigate(initial.clone()));
    });
    true
}
