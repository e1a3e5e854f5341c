// DOM ids, asset locations and render constants for the web front-end.

pub const CANVAS_ID: &str = "gallery-canvas";
pub const MANIFEST_URL: &str = "assets/gallery.json";

// Start gate (first user gesture unlocks audio playback)
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const START_BUTTON_ID: &str = "start-button";

// Overlay elements
pub const LOADING_ID: &str = "loading-overlay";
pub const TOOLTIP_ID: &str = "hotspot-tooltip";
pub const ARTIFACT_MODAL_ID: &str = "artifact-modal";
pub const ARTIFACT_TITLE_ID: &str = "artifact-title";
pub const ARTIFACT_IMAGE_ID: &str = "artifact-image";
pub const ARTIFACT_DESCRIPTION_ID: &str = "artifact-description";
pub const ARTIFACT_CLOSE_ID: &str = "artifact-close";
pub const DESCRIPTION_BUTTON_ID: &str = "description-toggle";
pub const VIDEO_MODAL_ID: &str = "video-modal";
pub const VIDEO_PLAYER_ID: &str = "video-player";
pub const VIDEO_CLOSE_ID: &str = "video-close";
pub const MUTE_BUTTON_ID: &str = "mute-toggle";
pub const ROOM_TITLE_ID: &str = "room-title";
pub const MINIMAP_ID: &str = "minimap";
pub const MINIMAP_INDICATOR_ID: &str = "minimap-indicator";
pub const ERROR_BANNER_ID: &str = "error-banner";

/// Elements carrying `data-room="<id>"` navigate on click.
pub const ROOM_LINK_SELECTOR: &str = "[data-room]";
pub const ROOM_ATTR: &str = "data-room";
pub const HIDDEN_CLASS: &str = "hidden";

pub const DESCRIPTION_PLAY_LABEL: &str = "Play Audio Description";
pub const DESCRIPTION_STOP_LABEL: &str = "Stop Audio Description";
pub const MUTE_ON_LABEL: &str = "Unmute";
pub const MUTE_OFF_LABEL: &str = "Mute";

// Rendering
/// Largest panorama edge uploaded to the GPU (WebGPU default limit).
pub const MAX_TEXTURE_DIM: u32 = 8192;
pub const CLEAR_RGB: [f64; 3] = [0.02, 0.02, 0.03];
pub const INITIAL_MARKER_CAPACITY: usize = 32;

// Marker look
pub const ARTIFACT_TINT: [f32; 3] = [1.0, 1.0, 1.0];
pub const VIDEO_TINT: [f32; 3] = [0.65, 0.85, 1.0];
pub const GLOW_TINT: [f32; 3] = [1.0, 0.85, 0.45];
pub const SPRITE_ALPHA: f32 = 0.95;
