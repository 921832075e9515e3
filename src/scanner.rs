use crate::constants::SCANNER_CANVAS_ID;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::render::CanvasSurface;
use hero_core::{ParticleScanner, ScannerConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// Page-owned handle to a running particle scanner.
#[wasm_bindgen]
pub struct ScannerHandle {
    scanner: Rc<RefCell<ParticleScanner>>,
    frames: Option<FrameLoop>,
    resize: Option<Listener>,
}

#[wasm_bindgen]
impl ScannerHandle {
    #[wasm_bindgen(js_name = setScanningActive)]
    pub fn set_scanning_active(&self, active: bool) {
        self.scanner.borrow_mut().set_scanning_active(active);
    }

    /// Current intensity, particle counts, fade zone and surface size as a
    /// plain object.
    pub fn stats(&self) -> JsValue {
        let stats = self.scanner.borrow().stats();
        serde_json::to_string(&stats)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Stop scheduling frames, detach the resize listener and drop every
    /// particle.
    pub fn destroy(&mut self) {
        let Some(frames) = self.frames.take() else {
            return;
        };
        frames.stop();
        self.resize.take();
        self.scanner.borrow_mut().clear();
        log::info!("[scanner] destroyed");
    }
}

impl Drop for ScannerHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the scanner on the canvas with id `canvas_id` (`#scannerCanvas` when
/// omitted). `config_json` may override any subset of the defaults. Returns
/// `undefined` when the canvas or its 2D context is unavailable.
#[wasm_bindgen(js_name = mountScanner)]
pub fn mount_scanner(
    canvas_id: Option<String>,
    config_json: Option<String>,
) -> Option<ScannerHandle> {
    let canvas_id = canvas_id.as_deref().unwrap_or(SCANNER_CANVAS_ID);
    match mount(canvas_id, config_json.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("[scanner] not started: {e}");
            None
        }
    }
}

fn mount(canvas_id: &str, config_json: Option<&str>) -> anyhow::Result<ScannerHandle> {
    let config = match config_json {
        Some(json) => serde_json::from_str::<ScannerConfig>(json)?,
        None => ScannerConfig::default(),
    };
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, canvas_id)?;
    let mut surface = CanvasSurface::new(&document, &canvas)?;

    let width = dom::inner_width();
    let height = config.surface_height;
    dom::fit_canvas(&canvas, width, height);

    let scanner = Rc::new(RefCell::new(ParticleScanner::new(
        config,
        width,
        height,
        rand::random(),
    )?));

    let scanner_resize = scanner.clone();
    let canvas_resize = canvas.clone();
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resize = Listener::new(&window, "resize", move |_| {
        let mut s = scanner_resize.borrow_mut();
        let width = dom::inner_width();
        let height = s.size().1;
        s.resize(width, height);
        dom::fit_canvas(&canvas_resize, width, height);
    });

    let scanner_tick = scanner.clone();
    let frames = FrameLoop::start(move |_| {
        scanner_tick.borrow_mut().tick(&mut surface);
    });

    log::info!("[scanner] mounted on #{canvas_id} ({width}x{height})");
    Ok(ScannerHandle {
        scanner,
        frames: Some(frames),
        resize: Some(resize),
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn add_canvas(id: &str) {
        let document = dom::window_document().expect("document");
        let canvas: web::HtmlCanvasElement = dom::create(&document, "canvas", "").expect("canvas");
        canvas.set_id(id);
        document
            .body()
            .expect("body")
            .append_child(&canvas)
            .expect("append");
    }

    #[wasm_bindgen_test]
    fn dropping_the_handle_clears_the_pool() {
        add_canvas("scannerDropCanvas");
        let handle = mount_scanner(Some("scannerDropCanvas".into()), None).expect("mounted");
        let scanner = handle.scanner.clone();
        assert_eq!(scanner.borrow().particle_count(), 800);
        drop(handle);
        assert_eq!(scanner.borrow().particle_count(), 0);
    }

    #[wasm_bindgen_test]
    fn omitted_canvas_id_uses_the_default_canvas() {
        add_canvas(SCANNER_CANVAS_ID);
        let mut handle = mount_scanner(None, None).expect("mounted on the default canvas");
        handle.destroy();
        handle.destroy();
        assert!(handle.frames.is_none());
    }

    #[wasm_bindgen_test]
    fn missing_canvas_is_not_mounted() {
        assert!(mount_scanner(Some("noSuchCanvas".into()), None).is_none());
    }
}
