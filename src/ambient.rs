use crate::constants::{AMBIENT_CANVAS_ID, HERO_FALLBACK_HEIGHT, HERO_WRAPPER_SELECTOR};
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::render::CanvasSurface;
use hero_core::{AmbientConfig, AmbientField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// Page-owned handle to the background drift layer.
#[wasm_bindgen]
pub struct AmbientHandle {
    field: Rc<RefCell<AmbientField>>,
    frames: Option<FrameLoop>,
    resize: Option<Listener>,
}

#[wasm_bindgen]
impl AmbientHandle {
    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.field.borrow().points().len()
    }

    /// Stop animating and detach the resize listener.
    pub fn destroy(&mut self) {
        let Some(frames) = self.frames.take() else {
            return;
        };
        frames.stop();
        self.resize.take();
        log::info!("[ambient] destroyed");
    }
}

impl Drop for AmbientHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the drift layer on `#canvas_id` (`#particleCanvas` when omitted),
/// sized to the hero section. Returns `undefined` when the canvas or its 2D
/// context is unavailable.
#[wasm_bindgen(js_name = mountAmbient)]
pub fn mount_ambient(
    canvas_id: Option<String>,
    config_json: Option<String>,
) -> Option<AmbientHandle> {
    let canvas_id = canvas_id.as_deref().unwrap_or(AMBIENT_CANVAS_ID);
    match mount(canvas_id, config_json.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("[ambient] not started: {e}");
            None
        }
    }
}

fn mount(canvas_id: &str, config_json: Option<&str>) -> anyhow::Result<AmbientHandle> {
    let config = match config_json {
        Some(json) => serde_json::from_str::<AmbientConfig>(json)?,
        None => AmbientConfig::default(),
    };
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, canvas_id)?;
    let mut surface = CanvasSurface::new(&document, &canvas)?;

    let (width, height) = dom::box_size(&document, HERO_WRAPPER_SELECTOR, HERO_FALLBACK_HEIGHT);
    dom::fit_canvas(&canvas, width, height);
    let field = Rc::new(RefCell::new(AmbientField::new(
        config,
        width,
        height,
        rand::random(),
    )?));

    let field_resize = field.clone();
    let canvas_resize = canvas.clone();
    let resize = Listener::new(&window, "resize", move |_| {
        let Some(document) = dom::window_document() else {
            return;
        };
        let (width, height) =
            dom::box_size(&document, HERO_WRAPPER_SELECTOR, HERO_FALLBACK_HEIGHT);
        field_resize.borrow_mut().resize(width, height);
        dom::fit_canvas(&canvas_resize, width, height);
    });

    let field_tick = field.clone();
    let frames = FrameLoop::start(move |_| {
        field_tick.borrow_mut().tick(&mut surface);
    });

    log::info!("[ambient] mounted on #{canvas_id} ({width}x{height})");
    Ok(AmbientHandle {
        field,
        frames: Some(frames),
        resize: Some(resize),
    })
}
