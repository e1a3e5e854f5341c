//! Panorama surface manager.
//!
//! The host does the actual texture fetch; this type decides what a finished
//! fetch means. A completion only touches the surface when it matches the
//! outstanding ticket, and a failed fetch leaves the last good surface alone.

use crate::constants::{SPHERE_HEIGHT_SEGMENTS, SPHERE_RADIUS, SPHERE_WIDTH_SEGMENTS};
use crate::hotspot::{Room, RoomId};
use crate::{GalleryError, Result};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// Work order handed to the host: fetch `uri` and report back with `ticket`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub room: RoomId,
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceState {
    pub room: RoomId,
    pub texture_uri: String,
    /// Ticket whose texture is bound; the renderer swaps when this changes.
    pub texture_ticket: LoadTicket,
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// First texture: the sphere was created.
    Created,
    /// Texture swapped on the existing sphere.
    Replaced,
    /// Completion for a superseded request; nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct PanoramaManager {
    surface: Option<SurfaceState>,
    pending: Option<LoadRequest>,
    next_ticket: u64,
}

impl PanoramaManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start fetching `room`'s panorama. Supersedes any outstanding request.
    pub fn begin_load(&mut self, room: &Room) -> LoadRequest {
        self.next_ticket += 1;
        let request = LoadRequest {
            ticket: LoadTicket(self.next_ticket),
            room: room.id.clone(),
            uri: room.panorama.clone(),
        };
        if let Some(prev) = self.pending.replace(request.clone()) {
            log::debug!(
                "[panorama] superseding load {:?} for `{}`",
                prev.ticket,
                prev.room
            );
        }
        request
    }

    /// Apply a host completion. `Err` from the host becomes
    /// [`GalleryError::AssetLoadFailure`] and leaves the surface untouched.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<(), String>,
    ) -> Result<LoadOutcome> {
        let matches = self.pending.as_ref().map(|p| p.ticket) == Some(ticket);
        if !matches {
            log::warn!("[panorama] ignoring stale completion {:?}", ticket);
            return Ok(LoadOutcome::Stale);
        }
        let Some(request) = self.pending.take() else {
            return Ok(LoadOutcome::Stale);
        };
        if let Err(reason) = result {
            log::error!("[panorama] failed to load {}: {}", request.uri, reason);
            return Err(GalleryError::AssetLoadFailure {
                uri: request.uri,
                reason,
            });
        }
        match self.surface.as_mut() {
            Some(surface) => {
                surface.room = request.room;
                surface.texture_uri = request.uri;
                surface.texture_ticket = request.ticket;
                Ok(LoadOutcome::Replaced)
            }
            None => {
                self.surface = Some(SurfaceState {
                    room: request.room,
                    texture_uri: request.uri,
                    texture_ticket: request.ticket,
                    radius: SPHERE_RADIUS,
                    width_segments: SPHERE_WIDTH_SEGMENTS,
                    height_segments: SPHERE_HEIGHT_SEGMENTS,
                });
                Ok(LoadOutcome::Created)
            }
        }
    }

    pub fn surface(&self) -> Option<&SurfaceState> {
        self.surface.as_ref()
    }

    pub fn pending(&self) -> Option<&LoadRequest> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct SphereMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// UV sphere with x mirrored, so the equirectangular texture reads correctly
/// from inside and triangles wind counter-clockwise as seen from the center.
pub fn inverted_sphere(radius: f32, width_segments: u32, height_segments: u32) -> SphereMesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut positions = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    let mut uvs = Vec::with_capacity(positions.capacity());
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let (sin_t, cos_t) = (v * PI).sin_cos();
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sin_p, cos_p) = (u * TAU).sin_cos();
            let x = -radius * cos_p * sin_t;
            let y = radius * cos_t;
            let z = radius * sin_p * sin_t;
            positions.push([-x, y, z]);
            uvs.push([u, v]);
        }
    }
    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    let stride = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    SphereMesh {
        positions,
        uvs,
        indices,
    }
}
