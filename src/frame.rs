use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` chain that calls `on_frame` once per display
/// refresh until stopped. Dropping the loop stops it.
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    tick: FrameCallback,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: FrameCallback = Rc::new(RefCell::new(None));

        let tick_next = tick.clone();
        let pending_next = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
            pending_next.set(None);
            on_frame(timestamp_ms);
            if let Some(cb) = tick_next.borrow().as_ref() {
                pending_next.set(request(cb));
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = tick.borrow().as_ref() {
            pending.set(request(cb));
        }
        Self { pending, tick }
    }

    /// Cancel the pending frame and release the callback.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's reference back to `tick`
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    let w = web::window()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}
