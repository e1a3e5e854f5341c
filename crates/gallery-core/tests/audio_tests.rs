mod common;

use common::approx;
use gallery_core::*;

fn director(rooms: usize) -> AudioDirector {
    let tracks = (1..=rooms).map(|i| format!("/assets/background{i}.mp3")).collect();
    AudioDirector::new(tracks, AudioConfig::default())
}

fn plays(cmds: &[AudioCommand], channel: ChannelId) -> usize {
    cmds.iter()
        .filter(|c| matches!(c, AudioCommand::Play { channel: ch, .. } if *ch == channel))
        .count()
}

#[test]
fn first_room_fades_in_over_two_seconds() {
    let mut a = director(2);
    a.enter_room(0, 10.0);
    let cmds = a.drain_commands();
    assert_eq!(plays(&cmds, ChannelId::Ambient(0)), 1);
    assert_eq!(a.ambient()[0].fade_start_time(), Some(10.0));

    a.tick(10.0);
    assert!(approx(a.volume(ChannelId::Ambient(0)), 0.0));
    a.tick(11.0);
    assert!(approx(a.volume(ChannelId::Ambient(0)), 0.25));
    a.tick(12.0);
    assert!(approx(a.volume(ChannelId::Ambient(0)), AMBIENT_NOMINAL_VOLUME));
    assert!(a.ambient()[0].fade().is_none());
}

#[test]
fn crossfade_leaves_one_audible_ambient() {
    let mut a = director(3);
    a.enter_room(0, 0.0);
    a.tick(2.0);
    a.drain_commands();

    a.enter_room(1, 5.0);
    a.tick(6.0);
    assert!(approx(a.volume(ChannelId::Ambient(0)), 0.25));
    assert!(approx(a.volume(ChannelId::Ambient(1)), 0.25));

    a.tick(7.0);
    assert!(approx(a.volume(ChannelId::Ambient(0)), 0.0));
    assert!(approx(a.volume(ChannelId::Ambient(1)), 0.5));
    assert_eq!(a.audible_ambient().collect::<Vec<_>>(), vec![1]);

    // The silent channel is paused once its fade is done.
    let cmds = a.drain_commands();
    assert!(cmds.contains(&AudioCommand::Pause {
        channel: ChannelId::Ambient(0)
    }));
    assert!(!a.is_playing(ChannelId::Ambient(0)));
}

#[test]
fn interrupted_crossfade_starts_from_current_volume() {
    let mut a = director(2);
    a.enter_room(0, 0.0);
    a.tick(1.0);
    a.enter_room(1, 1.0);
    let fade = *a.ambient()[0].fade().unwrap();
    assert!(approx(fade.from, 0.25));
    assert!(approx(fade.to, 0.0));
    a.tick(3.0);
    assert_eq!(a.audible_ambient().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn artifact_pauses_ambient_and_close_resumes_it() {
    let mut a = director(2);
    a.enter_room(1, 0.0);
    a.tick(2.0);
    a.drain_commands();

    a.open_artifact(Some("/assets/vase.mp3"), None);
    let cmds = a.drain_commands();
    assert!(cmds.contains(&AudioCommand::Pause {
        channel: ChannelId::Ambient(1)
    }));
    assert_eq!(plays(&cmds, ChannelId::Artifact), 1);
    assert_eq!(a.audible_ambient().count(), 0);
    assert!(approx(a.output_volume(ChannelId::Artifact), ARTIFACT_VOLUME));
    assert!(approx(a.output_volume(ChannelId::Ambient(1)), 0.0));

    a.close_overlay(3.0);
    let cmds = a.drain_commands();
    assert!(cmds.contains(&AudioCommand::Stop {
        channel: ChannelId::Artifact
    }));
    assert_eq!(plays(&cmds, ChannelId::Ambient(1)), 1);
    assert!(!a.is_playing(ChannelId::Artifact));
    assert!(a.artifact().current_track.is_none());
    a.tick(3.0);
    assert!(a.is_playing(ChannelId::Ambient(1)));
}

#[test]
fn opening_a_second_artifact_replaces_the_first() {
    let mut a = director(1);
    a.open_artifact(Some("/a.mp3"), None);
    a.open_artifact(Some("/b.mp3"), None);
    let cmds = a.drain_commands();
    assert_eq!(plays(&cmds, ChannelId::Artifact), 2);
    assert_eq!(a.artifact().current_track.as_deref(), Some("/b.mp3"));
    assert!(cmds.contains(&AudioCommand::Stop {
        channel: ChannelId::Artifact
    }));
}

#[test]
fn artifact_without_music_plays_nothing() {
    let mut a = director(1);
    a.open_artifact(None, None);
    assert_eq!(plays(&a.drain_commands(), ChannelId::Artifact), 0);
    assert!(!a.is_playing(ChannelId::Artifact));
}

#[test]
fn description_ducks_and_toggle_twice_restores() {
    let mut a = director(1);
    a.open_artifact(Some("/vase.mp3"), Some("/vase-described.mp3"));
    assert!(approx(a.volume(ChannelId::Artifact), 0.8));

    assert!(a.toggle_description());
    assert!(approx(a.volume(ChannelId::Artifact), ARTIFACT_DUCKED_VOLUME));
    assert!(a.is_playing(ChannelId::Description));

    assert!(!a.toggle_description());
    assert!(approx(a.volume(ChannelId::Artifact), 0.8));
    assert!(!a.is_playing(ChannelId::Description));
}

#[test]
fn description_end_restores_artifact() {
    let mut a = director(1);
    a.open_artifact(Some("/vase.mp3"), Some("/vase-described.mp3"));
    a.toggle_description();
    a.description_ended();
    assert!(approx(a.volume(ChannelId::Artifact), 0.8));
    assert_eq!(a.description(), &TrackChannel::default());
}

#[test]
fn description_needs_a_track() {
    let mut a = director(1);
    assert!(!a.toggle_description());
    a.open_artifact(Some("/vase.mp3"), None);
    assert!(!a.toggle_description());
    assert!(approx(a.volume(ChannelId::Artifact), 0.8));
}

#[test]
fn closing_stops_description_too() {
    let mut a = director(1);
    a.open_artifact(Some("/vase.mp3"), Some("/d.mp3"));
    a.toggle_description();
    a.drain_commands();
    a.close_overlay(0.0);
    let cmds = a.drain_commands();
    assert!(cmds.contains(&AudioCommand::Stop {
        channel: ChannelId::Description
    }));
    assert!(!a.is_playing(ChannelId::Description));
    assert!(!a.is_playing(ChannelId::Artifact));
}

#[test]
fn mute_is_idempotent_and_keeps_volumes() {
    let mut a = director(1);
    a.enter_room(0, 0.0);
    a.tick(2.0);

    assert!(a.set_muted(true));
    assert!(!a.set_muted(true));
    assert!(a.is_muted());
    assert!(approx(a.volume(ChannelId::Ambient(0)), 0.5));
    assert!(approx(a.output_volume(ChannelId::Ambient(0)), 0.0));

    assert!(a.set_muted(false));
    assert!(approx(a.output_volume(ChannelId::Ambient(0)), 0.5));
}

#[test]
fn room_change_under_an_overlay_waits_for_close() {
    let mut a = director(2);
    a.enter_room(0, 0.0);
    a.tick(2.0);
    a.open_video();
    a.drain_commands();

    a.enter_room(1, 3.0);
    assert_eq!(plays(&a.drain_commands(), ChannelId::Ambient(1)), 0);
    assert_eq!(a.room_channel(), Some(1));

    a.close_overlay(4.0);
    assert_eq!(plays(&a.drain_commands(), ChannelId::Ambient(1)), 1);
    a.tick(6.0);
    assert_eq!(a.audible_ambient().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn failed_channel_is_reset_and_reported() {
    let mut a = director(1);
    a.open_artifact(Some("/vase.mp3"), Some("/d.mp3"));
    a.toggle_description();

    let err = a.channel_failed(ChannelId::Description, "decode error");
    assert!(matches!(err, GalleryError::AssetLoadFailure { ref uri, .. } if uri == "/d.mp3"));
    assert!(!a.is_playing(ChannelId::Description));
    assert!(approx(a.volume(ChannelId::Artifact), 0.8));
    assert!(a.is_playing(ChannelId::Artifact));
}
