use crate::audio::ChannelId;
use crate::hotspot::RoomId;
use crate::panorama::LoadTicket;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// Pointer position in canvas pixels plus the viewport size in the same
    /// units.
    PointerMoved { px: Vec2, viewport: Vec2 },
    PointerDown { px: Vec2 },
    PointerUp { px: Vec2 },
    PointerCancel,
    Resized { aspect: f32 },
    Navigate(RoomId),
    PanoramaLoaded(LoadTicket),
    PanoramaFailed { ticket: LoadTicket, reason: String },
    CloseArtifactOverlay,
    ToggleAudioDescription,
    CloseVideoOverlay,
    SetMuted(bool),
    ToggleMute,
    AudioEnded(ChannelId),
    AudioFailed { channel: ChannelId, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    LoadingChanged(bool),
    /// `title: None` hides the tooltip.
    Hover {
        title: Option<String>,
        screen_x: f32,
        screen_y: f32,
    },
    ArtifactSelected {
        title: String,
        image: String,
        description: String,
        has_audio_description: bool,
    },
    VideoSelected { source: String },
    ArtifactClosed,
    VideoClosed,
    DescriptionChanged(bool),
    MuteChanged(bool),
    RoomChanged { room: RoomId, title: Option<String> },
    LoadError { uri: String, reason: String },
    NavigationRejected { room: RoomId, reason: String },
}
