use crate::constants::{DEFAULT_NAVIGATION_TITLE, DEFAULT_VIDEO_TITLE};
use fnv::FnvHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactInfo {
    pub title: String,
    pub image: String,
    pub description: String,
    pub music_track: Option<String>,
    pub audio_description_track: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HotspotKind {
    Navigation { target_room: RoomId },
    Artifact(ArtifactInfo),
    Video { source: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub position: Vec3,
    pub title: Option<String>,
    pub kind: HotspotKind,
}

impl Hotspot {
    pub fn display_title(&self) -> &str {
        if let Some(title) = self.title.as_deref() {
            return title;
        }
        match &self.kind {
            HotspotKind::Navigation { .. } => DEFAULT_NAVIGATION_TITLE,
            HotspotKind::Artifact(info) => &info.title,
            HotspotKind::Video { .. } => DEFAULT_VIDEO_TITLE,
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self.kind, HotspotKind::Navigation { .. })
    }

    /// Artifact and video markers are billboards with a hover glow.
    pub fn has_glow(&self) -> bool {
        matches!(self.kind, HotspotKind::Artifact(_) | HotspotKind::Video { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub title: Option<String>,
    pub panorama: String,
    pub ambient_track: String,
    pub hotspots: Vec<Hotspot>,
}

/// Validated, read-only set of rooms.
///
/// Built through [`HotspotRegistry::new`] (or from a manifest); construction
/// is where navigation targets are checked, so lookups at runtime cannot
/// dangle.
#[derive(Clone, Debug)]
pub struct HotspotRegistry {
    rooms: Vec<Room>,
    index: FnvHashMap<RoomId, usize>,
    initial_room: RoomId,
}

impl HotspotRegistry {
    pub fn new(rooms: Vec<Room>, initial_room: Option<RoomId>) -> crate::Result<Self> {
        use crate::GalleryError::InvalidManifest;

        if rooms.is_empty() {
            return Err(InvalidManifest("gallery has no rooms".into()));
        }
        let mut index = FnvHashMap::default();
        for (i, room) in rooms.iter().enumerate() {
            if room.id.as_str().is_empty() {
                return Err(InvalidManifest(format!("room #{i} has an empty id")));
            }
            if index.insert(room.id.clone(), i).is_some() {
                return Err(InvalidManifest(format!("duplicate room `{}`", room.id)));
            }
        }
        for room in &rooms {
            for (i, spot) in room.hotspots.iter().enumerate() {
                if !spot.position.is_finite() {
                    return Err(InvalidManifest(format!(
                        "hotspot #{i} in `{}` has a non-finite position",
                        room.id
                    )));
                }
                if let HotspotKind::Navigation { target_room } = &spot.kind {
                    if !index.contains_key(target_room) {
                        return Err(InvalidManifest(format!(
                            "hotspot #{i} in `{}` targets unknown room `{target_room}`",
                            room.id
                        )));
                    }
                }
            }
        }
        let initial_room = match initial_room {
            Some(id) if index.contains_key(&id) => id,
            Some(id) => {
                return Err(InvalidManifest(format!("initial room `{id}` does not exist")));
            }
            None => rooms[0].id.clone(),
        };
        Ok(Self {
            rooms,
            index,
            initial_room,
        })
    }

    /// Hotspots of `room` in authoring order. Same slice on every call.
    pub fn hotspots(&self, room: &RoomId) -> Option<&[Hotspot]> {
        self.room(room).map(|r| r.hotspots.as_slice())
    }

    pub fn room(&self, room: &RoomId) -> Option<&Room> {
        self.index.get(room).map(|&i| &self.rooms[i])
    }

    /// Position of `room` in authoring order; also its ambient channel index.
    pub fn room_index(&self, room: &RoomId) -> Option<usize> {
        self.index.get(room).copied()
    }

    pub fn contains(&self, room: &RoomId) -> bool {
        self.index.contains_key(room)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn initial_room(&self) -> &RoomId {
        &self.initial_room
    }
}
