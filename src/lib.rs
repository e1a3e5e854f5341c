#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use gallery_core::{EngineEvent, GalleryEngine};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod dom;
mod frame;
mod input;
mod overlay;
mod render;
mod texture;

use frame::Inbox;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn add_pointer_listener(
    canvas: &web::HtmlCanvasElement,
    kind: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Pointer move/down/up on the canvas become engine events. Capture keeps a
/// drag alive when the pointer leaves the canvas.
fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, inbox: &Inbox) {
    {
        let canvas_mv = canvas.clone();
        let inbox = inbox.clone();
        add_pointer_listener(canvas, "pointermove", move |ev| {
            let viewport = dom::canvas_css_size(&canvas_mv);
            let px = input::pointer_canvas_css(&ev, &canvas_mv);
            inbox
                .borrow_mut()
                .push(EngineEvent::PointerMoved { px, viewport });
        });
    }
    {
        let canvas_dn = canvas.clone();
        let inbox = inbox.clone();
        add_pointer_listener(canvas, "pointerdown", move |ev| {
            _ = canvas_dn.set_pointer_capture(ev.pointer_id());
            let viewport = dom::canvas_css_size(&canvas_dn);
            let px = input::pointer_canvas_css(&ev, &canvas_dn);
            let mut q = inbox.borrow_mut();
            // Touch has no hover; report the position before the press.
            q.push(EngineEvent::PointerMoved { px, viewport });
            q.push(EngineEvent::PointerDown { px });
        });
    }
    {
        let canvas_up = canvas.clone();
        let inbox = inbox.clone();
        add_pointer_listener(canvas, "pointerup", move |ev| {
            _ = canvas_up.release_pointer_capture(ev.pointer_id());
            let viewport = dom::canvas_css_size(&canvas_up);
            let px = input::clamp_to_viewport(input::pointer_canvas_css(&ev, &canvas_up), viewport);
            inbox.borrow_mut().push(EngineEvent::PointerUp { px });
        });
    }
    {
        let canvas_cancel = canvas.clone();
        let inbox = inbox.clone();
        add_pointer_listener(canvas, "pointercancel", move |ev| {
            _ = canvas_cancel.release_pointer_capture(ev.pointer_id());
            inbox.borrow_mut().push(EngineEvent::PointerCancel);
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::OverlayBridge::new(document).show_error(&format!("{e:#}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = dom::element(&document, CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let manifest = assets::fetch_text(MANIFEST_URL).await?;
    let aspect = input::aspect_of(dom::canvas_css_size(&canvas)).unwrap_or(1.0);
    let mut engine = GalleryEngine::from_manifest_json(&manifest, aspect)
        .map_err(|e| anyhow::anyhow!("gallery manifest: {e}"))?;
    log::info!(
        "[init] {} rooms, starting in `{}`",
        engine.registry().rooms().len(),
        engine.registry().initial_room()
    );

    let inbox: Inbox = Rc::new(RefCell::new(Vec::new()));
    wire_pointer_handlers(&canvas, &inbox);
    overlay::wire_controls(&document, &inbox);
    let initial = engine.registry().initial_room().clone();
    if !overlay::wire_start_gate(&document, &inbox, initial) {
        engine.start();
    }

    let players = audio::MediaChannels::new(engine.audio().channels(), &inbox);
    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        inbox,
        canvas,
        gpu,
        overlay: overlay::OverlayBridge::new(document),
        players,
        decoded: Rc::new(RefCell::new(Vec::new())),
        bound_ticket: None,
        last_aspect: Some(aspect),
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
