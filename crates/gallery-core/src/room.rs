//! Room transition state machine.
//!
//! `Idle → Clearing → Loading → Populating → Idle`. Clearing is synchronous
//! and always happens; population waits for the panorama completion carrying
//! the current ticket. Only one transition is ever in flight.

use crate::config::TransitionPolicy;
use crate::hotspot::{HotspotRegistry, RoomId};
use crate::marker::{HotspotMarker, MarkerId};
use crate::panorama::{LoadOutcome, LoadRequest, LoadTicket, PanoramaManager};
use crate::{GalleryError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Clearing { target: RoomId },
    Loading { target: RoomId, ticket: LoadTicket },
    Populating { target: RoomId },
}

#[derive(Debug)]
pub struct RoomState {
    pub active_room: Option<RoomId>,
    pub phase: TransitionPhase,
    pub active_markers: Vec<HotspotMarker>,
}

impl RoomState {
    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavigateOutcome {
    /// Markers cleared; the host must now fetch the panorama.
    Started {
        request: LoadRequest,
        cleared: usize,
    },
    /// Deferred until the in-flight transition settles.
    Queued { replaced: Option<RoomId> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadFinished {
    Entered {
        room: RoomId,
        previous: Option<RoomId>,
        markers: usize,
    },
    Stale,
}

#[derive(Debug)]
pub struct RoomTransitions {
    state: RoomState,
    policy: TransitionPolicy,
    queued: Option<RoomId>,
    next_marker_id: u64,
}

impl RoomTransitions {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            state: RoomState {
                active_room: None,
                phase: TransitionPhase::Idle,
                active_markers: Vec::new(),
            },
            policy,
            queued: None,
            next_marker_id: 0,
        }
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn markers(&self) -> &[HotspotMarker] {
        &self.state.active_markers
    }

    pub fn markers_mut(&mut self) -> &mut [HotspotMarker] {
        &mut self.state.active_markers
    }

    pub fn active_room(&self) -> Option<&RoomId> {
        self.state.active_room.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    pub fn queued(&self) -> Option<&RoomId> {
        self.queued.as_ref()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&HotspotMarker> {
        self.state.active_markers.iter().find(|m| m.id == id)
    }

    /// Begin a transition to `target`. Unknown rooms are rejected before any
    /// state is touched.
    pub fn navigate(
        &mut self,
        target: &RoomId,
        registry: &HotspotRegistry,
        panorama: &mut PanoramaManager,
    ) -> Result<NavigateOutcome> {
        let room = registry
            .room(target)
            .ok_or_else(|| GalleryError::InvalidNavigationTarget(target.clone()))?;

        if let Some(in_flight) = self.in_flight_target().cloned() {
            return match self.policy {
                TransitionPolicy::Reject => {
                    log::warn!("[room] rejecting `{}` while entering `{}`", target, in_flight);
                    Err(GalleryError::ConcurrentTransitionRequest {
                        in_flight,
                        requested: target.clone(),
                    })
                }
                TransitionPolicy::Queue => {
                    let replaced = self.queued.replace(target.clone());
                    if let Some(r) = &replaced {
                        log::warn!("[room] queued `{}` replaces queued `{}`", target, r);
                    } else {
                        log::info!("[room] queued `{}` behind `{}`", target, in_flight);
                    }
                    Ok(NavigateOutcome::Queued { replaced })
                }
            };
        }

        self.state.phase = TransitionPhase::Clearing {
            target: target.clone(),
        };
        let cleared = self.state.active_markers.len();
        self.state.active_markers.clear();
        log::debug!("[room] cleared {} markers", cleared);

        let request = panorama.begin_load(room);
        self.state.phase = TransitionPhase::Loading {
            target: target.clone(),
            ticket: request.ticket,
        };
        log::info!("[room] loading `{}` from {}", target, request.uri);
        Ok(NavigateOutcome::Started { request, cleared })
    }

    /// Feed the host's panorama completion. On success the markers are
    /// populated and the room becomes active. On failure the machine returns
    /// to idle with no markers and the previous active room id.
    pub fn load_finished(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<(), String>,
        registry: &HotspotRegistry,
        panorama: &mut PanoramaManager,
    ) -> Result<LoadFinished> {
        let target = match &self.state.phase {
            TransitionPhase::Loading { target, ticket: t } if *t == ticket => target.clone(),
            _ => {
                log::warn!("[room] completion {:?} does not match {:?}", ticket, self.state.phase);
                return Ok(LoadFinished::Stale);
            }
        };
        match panorama.complete_load(ticket, result) {
            Ok(LoadOutcome::Stale) => return Ok(LoadFinished::Stale),
            Ok(_) => {}
            Err(e) => {
                self.state.phase = TransitionPhase::Idle;
                return Err(e);
            }
        }

        self.state.phase = TransitionPhase::Populating {
            target: target.clone(),
        };
        let hotspots = registry.hotspots(&target).unwrap_or_default();
        let mut markers = Vec::with_capacity(hotspots.len());
        for (index, spot) in hotspots.iter().enumerate() {
            self.next_marker_id += 1;
            markers.push(HotspotMarker::new(MarkerId(self.next_marker_id), index, spot));
        }
        let count = markers.len();
        self.state.active_markers = markers;
        let previous = self.state.active_room.replace(target.clone());
        self.state.phase = TransitionPhase::Idle;
        log::info!("[room] entered `{}` with {} markers", target, count);
        Ok(LoadFinished::Entered {
            room: target,
            previous,
            markers: count,
        })
    }

    pub fn take_queued(&mut self) -> Option<RoomId> {
        if self.is_transitioning() {
            return None;
        }
        self.queued.take()
    }

    fn in_flight_target(&self) -> Option<&RoomId> {
        match &self.state.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Clearing { target }
            | TransitionPhase::Loading { target, .. }
            | TransitionPhase::Populating { target } => Some(target),
        }
    }
}
