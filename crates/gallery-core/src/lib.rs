//! Scene and interaction engine for an explorable panorama gallery.

pub mod animator;
pub mod audio;
pub mod camera;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod hotspot;
pub mod manifest;
pub mod marker;
pub mod panorama;
pub mod picking;
pub mod room;

pub use animator::*;
pub use audio::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use hotspot::*;
pub use manifest::*;
pub use marker::*;
pub use panorama::*;
pub use picking::*;
pub use room::*;

// Shaders bundled as string constants
pub static PANORAMA_WGSL: &str = include_str!("../shaders/panorama.wgsl");
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");
