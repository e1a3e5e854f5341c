//! HTML audio backend for the Audio Director.
//!
//! One `<audio>` element per logical channel. The director decides what
//! plays and how loud; this module applies its commands and mirrors its
//! volumes and mute flag onto the elements every frame.

use crate::frame::Inbox;
use gallery_core::{AudioCommand, AudioDirector, ChannelId, EngineEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

struct MediaChannel {
    id: ChannelId,
    element: web::HtmlAudioElement,
    uri: Option<String>,
}

pub struct MediaChannels {
    channels: Vec<MediaChannel>,
}

fn create_element(id: ChannelId, inbox: &Inbox) -> Result<web::HtmlAudioElement, ()> {
    let element = web::HtmlAudioElement::new().map_err(|e| {
        log::error!("[audio] {:?} element error: {:?}", id, e);
    })?;
    element.set_preload("auto");

    let ended_inbox = inbox.clone();
    let on_ended = Closure::wrap(Box::new(move || {
        ended_inbox.borrow_mut().push(EngineEvent::AudioEnded(id));
    }) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());
    on_ended.forget();

    let error_inbox = inbox.clone();
    let error_el = element.clone();
    let on_error = Closure::wrap(Box::new(move || {
        // `src` is empty after a deliberate Stop; that is not a failure.
        let src = error_el.current_src();
        if src.is_empty() {
            return;
        }
        error_inbox.borrow_mut().push(EngineEvent::AudioFailed {
            channel: id,
            reason: format!("media error while loading {src}"),
        });
    }) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();

    Ok(element)
}

impl MediaChannels {
    pub fn new(ids: impl IntoIterator<Item = ChannelId>, inbox: &Inbox) -> Self {
        let channels = ids
            .into_iter()
            .filter_map(|id| {
                create_element(id, inbox).ok().map(|element| MediaChannel {
                    id,
                    element,
                    uri: None,
                })
            })
            .collect();
        Self { channels }
    }

    fn get(&mut self, id: ChannelId) -> Option<&mut MediaChannel> {
        self.channels.iter_mut().find(|c| c.id == id)
    }

    pub fn apply(&mut self, command: &AudioCommand) {
        match command {
            AudioCommand::Play {
                channel,
                uri,
                looped,
                restart,
            } => {
                let Some(ch) = self.get(*channel) else {
                    return;
                };
                if ch.uri.as_deref() != Some(uri.as_str()) {
                    ch.element.set_src(uri);
                    ch.uri = Some(uri.clone());
                } else if *restart {
                    ch.element.set_current_time(0.0);
                }
                ch.element.set_loop(*looped);
                play(&ch.element, *channel);
            }
            AudioCommand::Pause { channel } => {
                if let Some(ch) = self.get(*channel) {
                    _ = ch.element.pause();
                }
            }
            AudioCommand::Stop { channel } => {
                if let Some(ch) = self.get(*channel) {
                    _ = ch.element.pause();
                    ch.element.set_current_time(0.0);
                    _ = ch.element.remove_attribute("src");
                    ch.element.load();
                    ch.uri = None;
                }
            }
        }
    }

    /// Mirror logical volumes and the mute flag.
    pub fn sync(&self, director: &AudioDirector) {
        let muted = director.is_muted();
        for ch in &self.channels {
            let v = director.volume(ch.id).clamp(0.0, 1.0) as f64;
            if (ch.element.volume() - v).abs() > 1e-3 {
                ch.element.set_volume(v);
            }
            if ch.element.muted() != muted {
                ch.element.set_muted(muted);
            }
        }
    }
}

fn play(element: &web::HtmlAudioElement, channel: ChannelId) {
    match element.play() {
        Ok(promise) => spawn_local(async move {
            // Autoplay refusals land here; the next gesture-driven Play retries.
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] {:?} play() rejected: {:?}", channel, e);
            }
        }),
        Err(e) => log::warn!("[audio] {:?} play() threw: {:?}", channel, e),
    }
}
