use crate::config::EngineConfig;
use crate::hotspot::{ArtifactInfo, Hotspot, HotspotKind, HotspotRegistry, Room, RoomId};
use crate::{GalleryError, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HotspotDef {
    #[serde(rename_all = "camelCase")]
    Navigation {
        position: Position,
        #[serde(alias = "action")]
        target_room: RoomId,
        #[serde(default)]
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Artifact {
        position: Position,
        title: String,
        image: String,
        #[serde(default)]
        description: String,
        #[serde(default, alias = "music")]
        music_track: Option<String>,
        #[serde(default, alias = "audioDescription")]
        audio_description_track: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        position: Position,
        video: String,
        #[serde(default)]
        title: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDef {
    pub id: RoomId,
    #[serde(default)]
    pub title: Option<String>,
    pub panorama: String,
    pub ambient_track: String,
    #[serde(default)]
    pub hotspots: Vec<HotspotDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryManifest {
    #[serde(default)]
    pub initial_room: Option<RoomId>,
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub config: EngineConfig,
}

impl GalleryManifest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and split into the registry and the engine configuration.
    pub fn into_registry(self) -> Result<(HotspotRegistry, EngineConfig)> {
        let rooms = self
            .rooms
            .into_iter()
            .map(RoomDef::into_room)
            .collect::<Result<Vec<_>>>()?;
        let registry = HotspotRegistry::new(rooms, self.initial_room)?;
        Ok((registry, self.config))
    }
}

impl RoomDef {
    fn into_room(self) -> Result<Room> {
        let id = self.id;
        if self.panorama.trim().is_empty() {
            return Err(GalleryError::InvalidManifest(format!(
                "room `{id}` has no panorama"
            )));
        }
        if self.ambient_track.trim().is_empty() {
            return Err(GalleryError::InvalidManifest(format!(
                "room `{id}` has no ambient track"
            )));
        }
        let hotspots = self
            .hotspots
            .into_iter()
            .enumerate()
            .map(|(i, def)| {
                def.into_hotspot().map_err(|why| {
                    GalleryError::InvalidManifest(format!("hotspot #{i} in `{id}`: {why}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Room {
            id,
            title: self.title,
            panorama: self.panorama,
            ambient_track: self.ambient_track,
            hotspots,
        })
    }
}

impl HotspotDef {
    fn into_hotspot(self) -> std::result::Result<Hotspot, String> {
        let non_empty = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(format!("`{field}` is empty"))
            } else {
                Ok(())
            }
        };
        let non_empty_opt = |field: &str, value: &Option<String>| match value {
            Some(v) => non_empty(field, v),
            None => Ok(()),
        };
        match self {
            HotspotDef::Navigation {
                position,
                target_room,
                title,
            } => {
                non_empty("targetRoom", target_room.as_str())?;
                Ok(Hotspot {
                    position: position.into(),
                    title,
                    kind: HotspotKind::Navigation { target_room },
                })
            }
            HotspotDef::Artifact {
                position,
                title,
                image,
                description,
                music_track,
                audio_description_track,
            } => {
                non_empty("title", &title)?;
                non_empty("image", &image)?;
                non_empty_opt("musicTrack", &music_track)?;
                non_empty_opt("audioDescriptionTrack", &audio_description_track)?;
                Ok(Hotspot {
                    position: position.into(),
                    title: None,
                    kind: HotspotKind::Artifact(ArtifactInfo {
                        title,
                        image,
                        description,
                        music_track,
                        audio_description_track,
                    }),
                })
            }
            HotspotDef::Video {
                position,
                video,
                title,
            } => {
                non_empty("video", &video)?;
                Ok(Hotspot {
                    position: position.into(),
                    title,
                    kind: HotspotKind::Video { source: video },
                })
            }
        }
    }
}
