use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{id} has the wrong element type: {:?}", e))
}

pub fn create<T: JsCast>(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<T> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{tag}>: {:?}", e))?;
    el.set_class_name(class);
    el.dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("<{tag}> cast: {:?}", e))
}

#[inline]
pub fn inner_width() -> f32 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

/// Size of the first element matching `selector`, falling back to the
/// window width and `fallback_height` when it is absent or not laid out.
pub fn box_size(document: &web::Document, selector: &str, fallback_height: f32) -> (f32, f32) {
    match document.query_selector(selector).ok().flatten() {
        Some(el) if el.client_width() > 0 => (el.client_width() as f32, el.client_height() as f32),
        _ => (inner_width(), fallback_height),
    }
}

/// Match the canvas backing store and its CSS box to `width` × `height`.
pub fn fit_canvas(canvas: &web::HtmlCanvasElement, width: f32, height: f32) {
    let w_px = width.max(1.0) as u32;
    let h_px = height.max(1.0) as u32;
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{w_px}px"));
    _ = style.set_property("height", &format!("{h_px}px"));
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    /// Registered with `passive: false` so the handler may call
    /// `preventDefault` on touch events.
    pub fn active(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
