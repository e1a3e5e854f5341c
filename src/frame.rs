use crate::assets;
use crate::audio::MediaChannels;
use crate::constants::MAX_TEXTURE_DIM;
use crate::dom;
use crate::input;
use crate::overlay::OverlayBridge;
use crate::render;
use crate::texture::DecodedImage;
use gallery_core::{EngineEvent, GalleryEngine, LoadRequest, LoadTicket};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Events raised by DOM callbacks, handed to the engine once per frame.
pub type Inbox = Rc<RefCell<Vec<EngineEvent>>>;

/// Decoded panoramas waiting for the engine to accept their ticket.
pub type DecodedStore = Rc<RefCell<Vec<(LoadTicket, DecodedImage)>>>;

pub struct FrameContext<'a> {
    pub engine: GalleryEngine,
    pub inbox: Inbox,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub overlay: OverlayBridge,
    pub players: MediaChannels,
    pub decoded: DecodedStore,
    pub bound_ticket: Option<LoadTicket>,
    pub last_aspect: Option<f32>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let css = dom::canvas_css_size(&self.canvas);
        if let Some(aspect) = input::aspect_of(css) {
            if input::aspect_changed(self.last_aspect, aspect) {
                self.last_aspect = Some(aspect);
                self.engine.push(EngineEvent::Resized { aspect });
            }
        }

        // Take the events first so no DOM callback sees a live borrow.
        let pending: Vec<EngineEvent> = std::mem::take(&mut *self.inbox.borrow_mut());
        for ev in pending {
            self.engine.push(ev);
        }
        let now_sec = self.started.elapsed().as_secs_f64();
        self.engine.tick(now_sec);

        for ev in self.engine.drain_events() {
            self.overlay.apply(&ev);
        }
        for cmd in self.engine.drain_audio_commands() {
            self.players.apply(&cmd);
        }
        self.players.sync(self.engine.audio());
        for req in self.engine.take_load_requests() {
            spawn_panorama_load(req, self.inbox.clone(), self.decoded.clone());
        }
        self.overlay.set_heading(self.engine.orbit().theta());

        if let Some(g) = &mut self.gpu {
            let current = self.engine.panorama().surface().map(|s| s.texture_ticket);
            if current.is_some() && current != self.bound_ticket {
                let mut store = self.decoded.borrow_mut();
                if let Some(pos) = store.iter().position(|(t, _)| Some(*t) == current) {
                    let (ticket, image) = store.swap_remove(pos);
                    g.set_panorama_texture(&image);
                    self.bound_ticket = Some(ticket);
                    // Anything older can never be bound now.
                    store.retain(|(t, _)| *t > ticket);
                }
            }
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(self.engine.camera(), self.engine.markers()) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

fn spawn_panorama_load(req: LoadRequest, inbox: Inbox, decoded: DecodedStore) {
    log::info!("[frame] fetching {} ({:?})", req.uri, req.ticket);
    spawn_local(async move {
        let event = match assets::load_panorama(&req.uri, MAX_TEXTURE_DIM).await {
            Ok(image) => {
                decoded.borrow_mut().push((req.ticket, image));
                EngineEvent::PanoramaLoaded(req.ticket)
            }
            Err(e) => {
                log::error!("[frame] panorama {} failed: {:?}", req.uri, e);
                EngineEvent::PanoramaFailed {
                    ticket: req.ticket,
                    reason: format!("{e:#}"),
                }
            }
        };
        inbox.borrow_mut().push(event);
    });
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
