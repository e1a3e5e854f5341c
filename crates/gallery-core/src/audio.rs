use crate::config::AudioConfig;
use crate::GalleryError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Ambient(usize),
    Artifact,
    Description,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCommand {
    /// Start playback. With `restart` the track begins from zero, otherwise a
    /// paused element resumes where it stopped.
    Play {
        channel: ChannelId,
        uri: String,
        looped: bool,
        restart: bool,
    },
    Pause { channel: ChannelId },
    Stop { channel: ChannelId },
}

/// Linear volume ramp sampled from wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub start_sec: f64,
    pub duration_sec: f64,
}

impl Fade {
    pub fn progress(&self, now_sec: f64) -> f64 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        ((now_sec - self.start_sec) / self.duration_sec).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_sec: f64) -> f32 {
        let p = self.progress(now_sec) as f32;
        (self.from + (self.to - self.from) * p).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }
}

#[derive(Clone, Debug)]
pub struct AmbientChannel {
    pub track: String,
    pub volume: f32,
    pub target_volume: f32,
    pub is_playing: bool,
    fade: Option<Fade>,
}

impl AmbientChannel {
    fn new(track: String) -> Self {
        Self {
            track,
            volume: 0.0,
            target_volume: 0.0,
            is_playing: false,
            fade: None,
        }
    }

    pub fn fade(&self) -> Option<&Fade> {
        self.fade.as_ref()
    }

    pub fn fade_start_time(&self) -> Option<f64> {
        self.fade.map(|f| f.start_sec)
    }

    fn fade_to(&mut self, target: f32, now_sec: f64, duration_sec: f64) {
        self.target_volume = target;
        self.fade = if (self.volume - target).abs() <= f32::EPSILON {
            self.volume = target;
            None
        } else {
            Some(Fade {
                from: self.volume,
                to: target,
                start_sec: now_sec,
                duration_sec,
            })
        };
    }
}

/// Artifact or description channel: at most one instance at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackChannel {
    pub current_track: Option<String>,
    pub volume: f32,
    pub is_playing: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Foreground {
    #[default]
    None,
    Artifact {
        description_track: Option<String>,
    },
    Video,
}

#[derive(Debug)]
pub struct AudioDirector {
    config: AudioConfig,
    ambient: Vec<AmbientChannel>,
    artifact: TrackChannel,
    description: TrackChannel,
    muted: bool,
    room_channel: Option<usize>,
    foreground: Foreground,
    commands: Vec<AudioCommand>,
}

impl AudioDirector {
    pub fn new(ambient_tracks: Vec<String>, config: AudioConfig) -> Self {
        Self {
            config,
            ambient: ambient_tracks.into_iter().map(AmbientChannel::new).collect(),
            artifact: TrackChannel::default(),
            description: TrackChannel::default(),
            muted: false,
            room_channel: None,
            foreground: Foreground::None,
            commands: Vec::new(),
        }
    }

    //--- Rooms -------------------------------------------------------------

    pub fn enter_room(&mut self, index: usize, now_sec: f64) {
        if index >= self.ambient.len() {
            log::warn!("[audio] no ambient channel {}", index);
            return;
        }
        self.room_channel = Some(index);
        if self.foreground == Foreground::None {
            self.crossfade(now_sec);
        }
    }

    pub fn tick(&mut self, now_sec: f64) {
        for (i, ch) in self.ambient.iter_mut().enumerate() {
            let Some(fade) = ch.fade else {
                continue;
            };
            ch.volume = fade.sample(now_sec);
            if fade.is_done(now_sec) {
                ch.fade = None;
                ch.volume = fade.to;
                if fade.to <= 0.0 && ch.is_playing {
                    ch.is_playing = false;
                    self.commands.push(AudioCommand::Pause {
                        channel: ChannelId::Ambient(i),
                    });
                }
                log::debug!("[audio] ambient {} settled at {:.2}", i, ch.volume);
            }
        }
    }

    fn crossfade(&mut self, now_sec: f64) {
        let nominal = self.config.ambient_volume;
        let duration = self.config.crossfade_sec;
        for (i, ch) in self.ambient.iter_mut().enumerate() {
            let target = if Some(i) == self.room_channel {
                nominal
            } else {
                0.0
            };
            if target <= 0.0 && !ch.is_playing {
                // Paused channels are already silent.
                ch.volume = 0.0;
                ch.target_volume = 0.0;
                ch.fade = None;
                continue;
            }
            ch.fade_to(target, now_sec, duration);
            if target > 0.0 && !ch.is_playing {
                ch.is_playing = true;
                self.commands.push(AudioCommand::Play {
                    channel: ChannelId::Ambient(i),
                    uri: ch.track.clone(),
                    looped: true,
                    restart: false,
                });
            }
        }
    }

    fn pause_ambient(&mut self) {
        for (i, ch) in self.ambient.iter_mut().enumerate() {
            ch.fade = None;
            if Some(i) != self.room_channel {
                ch.volume = 0.0;
                ch.target_volume = 0.0;
            }
            if ch.is_playing {
                ch.is_playing = false;
                self.commands.push(AudioCommand::Pause {
                    channel: ChannelId::Ambient(i),
                });
            }
        }
    }

    //--- Overlays ----------------------------------------------------------

    pub fn open_artifact(&mut self, music_track: Option<&str>, description_track: Option<&str>) {
        self.pause_ambient();
        self.stop_description();
        self.stop_artifact();
        self.foreground = Foreground::Artifact {
            description_track: description_track.map(str::to_owned),
        };
        if let Some(uri) = music_track {
            self.artifact = TrackChannel {
                current_track: Some(uri.to_owned()),
                volume: self.config.artifact_volume,
                is_playing: true,
            };
            self.commands.push(AudioCommand::Play {
                channel: ChannelId::Artifact,
                uri: uri.to_owned(),
                looped: true,
                restart: true,
            });
            log::info!("[audio] artifact track {}", uri);
        }
    }

    pub fn open_video(&mut self) {
        self.pause_ambient();
        self.stop_description();
        self.stop_artifact();
        self.foreground = Foreground::Video;
    }

    pub fn close_overlay(&mut self, now_sec: f64) {
        self.stop_description();
        self.stop_artifact();
        self.foreground = Foreground::None;
        self.crossfade(now_sec);
    }

    /// Start or stop the description track. Returns whether it now plays.
    /// Outside an artifact overlay, or for artifacts without a description,
    /// nothing happens.
    pub fn toggle_description(&mut self) -> bool {
        let track = match &self.foreground {
            Foreground::Artifact {
                description_track: Some(t),
            } => t.clone(),
            _ => return false,
        };
        if self.description.is_playing {
            self.stop_description();
            return false;
        }
        if self.artifact.is_playing {
            self.artifact.volume = self.config.artifact_ducked_volume;
        }
        self.description = TrackChannel {
            current_track: Some(track.clone()),
            volume: self.config.description_volume,
            is_playing: true,
        };
        self.commands.push(AudioCommand::Play {
            channel: ChannelId::Description,
            uri: track,
            looped: false,
            restart: true,
        });
        true
    }

    pub fn description_ended(&mut self) {
        if self.description.is_playing {
            self.description = TrackChannel::default();
            self.restore_artifact();
        }
    }

    /// The host could not play `channel`. Only that channel is reset.
    pub fn channel_failed(&mut self, channel: ChannelId, reason: &str) -> GalleryError {
        let uri = self.track_of(channel).unwrap_or_default();
        log::error!("[audio] {:?} failed ({}): {}", channel, uri, reason);
        match channel {
            ChannelId::Ambient(i) => {
                if let Some(ch) = self.ambient.get_mut(i) {
                    ch.is_playing = false;
                    ch.fade = None;
                    ch.volume = 0.0;
                    ch.target_volume = 0.0;
                }
            }
            ChannelId::Artifact => self.artifact = TrackChannel::default(),
            ChannelId::Description => {
                self.description = TrackChannel::default();
                self.restore_artifact();
            }
        }
        GalleryError::AssetLoadFailure {
            uri,
            reason: reason.to_owned(),
        }
    }

    fn stop_artifact(&mut self) {
        if self.artifact.current_track.is_some() {
            self.commands.push(AudioCommand::Stop {
                channel: ChannelId::Artifact,
            });
        }
        self.artifact = TrackChannel::default();
    }

    fn stop_description(&mut self) {
        if self.description.current_track.is_some() {
            self.commands.push(AudioCommand::Stop {
                channel: ChannelId::Description,
            });
            self.restore_artifact();
        }
        self.description = TrackChannel::default();
    }

    fn restore_artifact(&mut self) {
        if self.artifact.is_playing {
            self.artifact.volume = self.config.artifact_volume;
        }
    }

    //--- Mute --------------------------------------------------------------

    /// Returns true when the flag actually changed.
    pub fn set_muted(&mut self, muted: bool) -> bool {
        let changed = self.muted != muted;
        self.muted = muted;
        if changed {
            log::info!("[audio] muted={}", muted);
        }
        changed
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    //--- Queries -----------------------------------------------------------

    pub fn volume(&self, channel: ChannelId) -> f32 {
        match channel {
            ChannelId::Ambient(i) => self.ambient.get(i).map(|c| c.volume).unwrap_or(0.0),
            ChannelId::Artifact => self.artifact.volume,
            ChannelId::Description => self.description.volume,
        }
    }

    pub fn output_volume(&self, channel: ChannelId) -> f32 {
        if self.muted || !self.is_playing(channel) {
            0.0
        } else {
            self.volume(channel)
        }
    }

    pub fn is_playing(&self, channel: ChannelId) -> bool {
        match channel {
            ChannelId::Ambient(i) => self.ambient.get(i).is_some_and(|c| c.is_playing),
            ChannelId::Artifact => self.artifact.is_playing,
            ChannelId::Description => self.description.is_playing,
        }
    }

    pub fn track_of(&self, channel: ChannelId) -> Option<String> {
        match channel {
            ChannelId::Ambient(i) => self.ambient.get(i).map(|c| c.track.clone()),
            ChannelId::Artifact => self.artifact.current_track.clone(),
            ChannelId::Description => self.description.current_track.clone(),
        }
    }

    pub fn ambient(&self) -> &[AmbientChannel] {
        &self.ambient
    }

    pub fn artifact(&self) -> &TrackChannel {
        &self.artifact
    }

    pub fn description(&self) -> &TrackChannel {
        &self.description
    }

    pub fn room_channel(&self) -> Option<usize> {
        self.room_channel
    }

    pub fn audible_ambient(&self) -> impl Iterator<Item = usize> + '_ {
        self.ambient
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_playing && c.volume > 0.0)
            .map(|(i, _)| i)
    }

    pub fn channels(&self) -> impl Iterator<Item = ChannelId> {
        (0..self.ambient.len())
            .map(ChannelId::Ambient)
            .chain([ChannelId::Artifact, ChannelId::Description])
    }

    pub fn drain_commands(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }
}
