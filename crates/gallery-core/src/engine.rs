use crate::animator::HoverAnimator;
use crate::audio::{AudioCommand, AudioDirector, ChannelId};
use crate::camera::{Camera, OrbitController};
use crate::config::EngineConfig;
use crate::constants::TOOLTIP_OFFSET_PX;
use crate::events::{EngineEvent, OverlayEvent};
use crate::hotspot::{HotspotKind, HotspotRegistry, RoomId};
use crate::manifest::GalleryManifest;
use crate::marker::HotspotMarker;
use crate::panorama::{LoadRequest, LoadTicket, PanoramaManager};
use crate::picking::{ndc_from_px, HoverChange, PickState, PickingController};
use crate::room::{LoadFinished, NavigateOutcome, RoomState, RoomTransitions};
use crate::{GalleryError, Result};
use glam::Vec2;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Closed,
    Artifact,
    Video,
}

pub struct GalleryEngine {
    registry: HotspotRegistry,
    camera: Camera,
    orbit: OrbitController,
    click_tolerance_px: f32,
    viewport: Vec2,
    panorama: PanoramaManager,
    rooms: RoomTransitions,
    picking: PickingController,
    animator: HoverAnimator,
    audio: AudioDirector,
    overlay: OverlayState,
    inbox: VecDeque<EngineEvent>,
    outbox: Vec<OverlayEvent>,
    load_requests: Vec<LoadRequest>,
    last_tick_sec: Option<f64>,
    now_sec: f64,
}

impl GalleryEngine {
    pub fn new(registry: HotspotRegistry, config: EngineConfig, aspect: f32) -> Self {
        let ambient_tracks = registry
            .rooms()
            .iter()
            .map(|r| r.ambient_track.clone())
            .collect();
        Self {
            camera: Camera::from_config(&config.camera, aspect),
            orbit: OrbitController::new(&config.camera),
            click_tolerance_px: config.camera.click_drag_tolerance_px,
            viewport: Vec2::ONE,
            panorama: PanoramaManager::new(),
            rooms: RoomTransitions::new(config.transition_policy),
            picking: PickingController::new(),
            animator: HoverAnimator::new(config.animation),
            audio: AudioDirector::new(ambient_tracks, config.audio),
            overlay: OverlayState::Closed,
            inbox: VecDeque::new(),
            outbox: Vec::new(),
            load_requests: Vec::new(),
            last_tick_sec: None,
            now_sec: 0.0,
            registry,
        }
    }

    pub fn from_manifest_json(text: &str, aspect: f32) -> Result<Self> {
        let (registry, config) = GalleryManifest::from_json(text)?.into_registry()?;
        Ok(Self::new(registry, config, aspect))
    }

    pub fn start(&mut self) {
        let initial = self.registry.initial_room().clone();
        log::info!("[engine] starting in `{}`", initial);
        self.push(EngineEvent::Navigate(initial));
    }

    pub fn push(&mut self, event: EngineEvent) {
        self.inbox.push_back(event);
    }

    /// Apply queued events, then run the frame update. `now_sec` must come
    /// from a monotonic clock.
    pub fn tick(&mut self, now_sec: f64) {
        let dt = self
            .last_tick_sec
            .map(|last| (now_sec - last).max(0.0))
            .unwrap_or(0.0);
        self.last_tick_sec = Some(now_sec);
        self.now_sec = now_sec;

        while let Some(event) = self.inbox.pop_front() {
            if let Err(e) = self.dispatch(event) {
                self.report(e);
            }
        }
        self.frame(dt as f32);
    }

    fn dispatch(&mut self, event: EngineEvent) -> Result<()> {
        match event {
            EngineEvent::PointerMoved { px, viewport } => {
                self.viewport = viewport;
                if self.orbit.is_dragging() {
                    self.orbit.drag_to(px, viewport.y);
                }
                self.pointer_moved(px);
            }
            EngineEvent::PointerDown { px } => self.orbit.begin_drag(px),
            EngineEvent::PointerUp { px } => {
                let tail = (px - self.picking.state().pointer_px).length();
                let travelled = self.orbit.drag_travel() + tail;
                self.orbit.end_drag();
                if travelled <= self.click_tolerance_px {
                    self.click()?;
                } else {
                    log::debug!("[engine] drag of {:.1}px, not a click", travelled);
                }
            }
            EngineEvent::PointerCancel => {
                // The browser took the gesture over; never a click.
                self.orbit.end_drag();
            }
            EngineEvent::Resized { aspect } => {
                if aspect.is_finite() && aspect > 0.0 {
                    self.camera.aspect = aspect;
                }
            }
            EngineEvent::Navigate(room) => self.navigate(room)?,
            EngineEvent::PanoramaLoaded(ticket) => self.finish_load(ticket, Ok(()))?,
            EngineEvent::PanoramaFailed { ticket, reason } => {
                self.finish_load(ticket, Err(reason))?
            }
            EngineEvent::CloseArtifactOverlay => self.close_artifact(),
            EngineEvent::CloseVideoOverlay => self.close_video(),
            EngineEvent::ToggleAudioDescription => {
                if self.overlay == OverlayState::Artifact {
                    let playing = self.audio.toggle_description();
                    self.outbox.push(OverlayEvent::DescriptionChanged(playing));
                }
            }
            EngineEvent::SetMuted(muted) => self.set_muted(muted),
            EngineEvent::ToggleMute => self.set_muted(!self.audio.is_muted()),
            EngineEvent::AudioEnded(ChannelId::Description) => {
                if self.audio.is_playing(ChannelId::Description) {
                    self.audio.description_ended();
                    self.outbox.push(OverlayEvent::DescriptionChanged(false));
                }
            }
            EngineEvent::AudioEnded(channel) => {
                log::debug!("[engine] {:?} ended", channel);
            }
            EngineEvent::AudioFailed { channel, reason } => {
                let was_describing = self.audio.is_playing(ChannelId::Description);
                let err = self.audio.channel_failed(channel, &reason);
                if channel == ChannelId::Description && was_describing {
                    self.outbox.push(OverlayEvent::DescriptionChanged(false));
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn frame(&mut self, dt_sec: f32) {
        self.orbit.update(dt_sec);
        self.orbit.apply(&mut self.camera);
        self.audio.tick(self.now_sec);
        self.animator.frame(
            self.rooms.markers_mut(),
            self.picking.hovered(),
            self.camera.eye,
            self.now_sec,
        );
    }

    //--- Picking -----------------------------------------------------------

    fn pointer_moved(&mut self, px: Vec2) {
        if self.overlay != OverlayState::Closed {
            self.hide_tooltip();
            return;
        }
        let ndc = ndc_from_px(px, self.viewport);
        let change = self
            .picking
            .pointer_moved(ndc, px, &self.camera, self.rooms.markers());
        if let HoverChange::Entered(id) | HoverChange::Switched { to: id, .. } = change {
            log::debug!("[pick] hover {:?}", id);
        }
        match self.picking.hovered().and_then(|id| self.rooms.marker(id)) {
            Some(marker) => {
                let at = px + Vec2::splat(TOOLTIP_OFFSET_PX);
                self.outbox.push(OverlayEvent::Hover {
                    title: Some(marker.hotspot.display_title().to_owned()),
                    screen_x: at.x,
                    screen_y: at.y,
                });
            }
            None if change != HoverChange::Unchanged => self.push_tooltip_hidden(),
            None => {}
        }
    }

    fn hide_tooltip(&mut self) {
        if self.picking.clear_hover() != HoverChange::Unchanged {
            self.push_tooltip_hidden();
        }
    }

    fn push_tooltip_hidden(&mut self) {
        let at = self.picking.state().pointer_px;
        self.outbox.push(OverlayEvent::Hover {
            title: None,
            screen_x: at.x,
            screen_y: at.y,
        });
    }

    fn click(&mut self) -> Result<()> {
        if self.overlay != OverlayState::Closed || self.rooms.is_transitioning() {
            return Ok(());
        }
        let Some(hit) = self.picking.click(&self.camera, self.rooms.markers()) else {
            return Ok(());
        };
        let Some(marker) = self.rooms.marker(hit.marker).cloned() else {
            return Ok(());
        };
        self.select(marker)
    }

    fn select(&mut self, marker: HotspotMarker) -> Result<()> {
        log::info!(
            "[engine] select {:?} `{}`",
            marker.id,
            marker.hotspot.display_title()
        );
        match marker.hotspot.kind {
            HotspotKind::Navigation { target_room } => self.navigate(target_room),
            HotspotKind::Artifact(info) => {
                self.hide_tooltip();
                self.overlay = OverlayState::Artifact;
                self.audio.open_artifact(
                    info.music_track.as_deref(),
                    info.audio_description_track.as_deref(),
                );
                self.outbox.push(OverlayEvent::ArtifactSelected {
                    has_audio_description: info.audio_description_track.is_some(),
                    title: info.title,
                    image: info.image,
                    description: info.description,
                });
                Ok(())
            }
            HotspotKind::Video { source } => {
                self.hide_tooltip();
                self.overlay = OverlayState::Video;
                self.audio.open_video();
                self.outbox.push(OverlayEvent::VideoSelected { source });
                Ok(())
            }
        }
    }

    //--- Overlays and mute -------------------------------------------------

    fn close_artifact(&mut self) {
        if self.overlay != OverlayState::Artifact {
            return;
        }
        let was_describing = self.audio.is_playing(ChannelId::Description);
        self.overlay = OverlayState::Closed;
        self.audio.close_overlay(self.now_sec);
        if was_describing {
            self.outbox.push(OverlayEvent::DescriptionChanged(false));
        }
        self.outbox.push(OverlayEvent::ArtifactClosed);
    }

    fn close_video(&mut self) {
        if self.overlay != OverlayState::Video {
            return;
        }
        self.overlay = OverlayState::Closed;
        self.audio.close_overlay(self.now_sec);
        self.outbox.push(OverlayEvent::VideoClosed);
    }

    fn set_muted(&mut self, muted: bool) {
        if self.audio.set_muted(muted) {
            self.outbox.push(OverlayEvent::MuteChanged(muted));
        }
    }

    //--- Rooms -------------------------------------------------------------

    fn navigate(&mut self, target: RoomId) -> Result<()> {
        if !self.registry.contains(&target) {
            return Err(GalleryError::InvalidNavigationTarget(target));
        }
        match self.overlay {
            OverlayState::Artifact => self.close_artifact(),
            OverlayState::Video => self.close_video(),
            OverlayState::Closed => {}
        }
        match self
            .rooms
            .navigate(&target, &self.registry, &mut self.panorama)?
        {
            NavigateOutcome::Started { request, .. } => {
                self.hide_tooltip();
                self.outbox.push(OverlayEvent::LoadingChanged(true));
                self.load_requests.push(request);
            }
            NavigateOutcome::Queued {
                replaced: Some(dropped),
            } => {
                self.outbox.push(OverlayEvent::NavigationRejected {
                    reason: format!("superseded by `{target}`"),
                    room: dropped,
                });
            }
            NavigateOutcome::Queued { replaced: None } => {}
        }
        Ok(())
    }

    fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<(), String>,
    ) -> Result<()> {
        let finished = self
            .rooms
            .load_finished(ticket, result, &self.registry, &mut self.panorama);
        let outcome = match finished {
            Ok(LoadFinished::Stale) => return Ok(()),
            Ok(LoadFinished::Entered { room, .. }) => {
                self.outbox.push(OverlayEvent::LoadingChanged(false));
                self.animator
                    .layout(self.rooms.markers_mut(), self.camera.eye, self.now_sec);
                if let Some(index) = self.registry.room_index(&room) {
                    self.audio.enter_room(index, self.now_sec);
                }
                let title = self.registry.room(&room).and_then(|r| r.title.clone());
                self.outbox.push(OverlayEvent::RoomChanged { room, title });
                Ok(())
            }
            Err(e) => {
                self.outbox.push(OverlayEvent::LoadingChanged(false));
                Err(e)
            }
        };
        if let Some(next) = self.rooms.take_queued() {
            if let Err(e) = self.navigate(next) {
                self.report(e);
            }
        }
        outcome
    }

    fn report(&mut self, error: GalleryError) {
        log::error!("[engine] {}", error);
        let event = match error {
            GalleryError::AssetLoadFailure { uri, reason } => OverlayEvent::LoadError { uri, reason },
            GalleryError::InvalidNavigationTarget(room) => OverlayEvent::NavigationRejected {
                reason: format!("unknown room `{room}`"),
                room,
            },
            GalleryError::ConcurrentTransitionRequest {
                in_flight,
                requested,
            } => OverlayEvent::NavigationRejected {
                reason: format!("still entering `{in_flight}`"),
                room: requested,
            },
            other => OverlayEvent::LoadError {
                uri: String::new(),
                reason: other.to_string(),
            },
        };
        self.outbox.push(event);
    }

    //--- Outputs and queries -----------------------------------------------

    pub fn drain_events(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn drain_audio_commands(&mut self) -> Vec<AudioCommand> {
        self.audio.drain_commands()
    }

    pub fn take_load_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.load_requests)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn markers(&self) -> &[HotspotMarker] {
        self.rooms.markers()
    }

    pub fn room_state(&self) -> &RoomState {
        self.rooms.state()
    }

    pub fn active_room(&self) -> Option<&RoomId> {
        self.rooms.active_room()
    }

    pub fn is_transitioning(&self) -> bool {
        self.rooms.is_transitioning()
    }

    pub fn pick_state(&self) -> &PickState {
        self.picking.state()
    }

    pub fn audio(&self) -> &AudioDirector {
        &self.audio
    }

    pub fn panorama(&self) -> &PanoramaManager {
        &self.panorama
    }

    pub fn registry(&self) -> &HotspotRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }
}
