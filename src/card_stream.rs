use crate::constants::*;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use hero_core::{card_clip, generate_code, CardStream, CardStreamConfig, Span};
use instant::Instant;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

struct CardStreamView {
    stream: CardStream,
    container: web::HtmlElement,
    line: web::HtmlElement,
    rng: StdRng,
    last_instant: Instant,
}

impl CardStreamView {
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.stream.tick(dt.as_secs_f32());
        self.apply_position();
        self.update_clipping();
    }

    fn apply_position(&self) {
        dom::set_style(&self.line, "transform", &translate_x(self.stream.position()));
    }

    fn container_width(&self) -> f32 {
        match self.container.client_width() {
            w if w > 0 => w as f32,
            _ => dom::inner_width(),
        }
    }

    fn on_resize(&mut self) {
        let width = self.container_width();
        self.stream.set_container_width(width);
    }

    /// Move each card's clip boundary to where the scanner crosses it and
    /// flash the cards that just started crossing.
    fn update_clipping(&self) {
        let origin = self.container.get_bounding_client_rect().left() as f32;
        let scanner = self.stream.scanner_span().offset(origin);
        let Ok(wrappers) = self
            .line
            .query_selector_all(&format!(".{CARD_WRAPPER_CLASS}"))
        else {
            return;
        };
        for i in 0..wrappers.length() {
            let Some(wrapper) = wrappers.get(i).and_then(|n| n.dyn_into::<web::Element>().ok())
            else {
                continue;
            };
            let rect = wrapper.get_bounding_client_rect();
            let card = Span {
                left: rect.left() as f32,
                right: rect.right() as f32,
            };
            let clip = card_clip(card, scanner);
            if let Some((normal_right, ascii_left)) = clip.clip_percents() {
                set_var(&wrapper, CARD_NORMAL_SELECTOR, CLIP_RIGHT_VAR, normal_right);
                set_var(&wrapper, CARD_ASCII_SELECTOR, CLIP_LEFT_VAR, ascii_left);
            }
            if clip.is_crossing() {
                if clip.starts_scan() && !wrapper.has_attribute(SCANNED_ATTR) {
                    _ = wrapper.set_attribute(SCANNED_ATTR, "true");
                    flash_scan_effect(&wrapper);
                }
            } else {
                _ = wrapper.remove_attribute(SCANNED_ATTR);
            }
        }
    }

    fn refresh_code(&mut self) {
        let chance = self.stream.config().code_refresh_chance;
        let cols = self.stream.config().code_cols as usize;
        let rows = self.stream.config().code_rows as usize;
        let Ok(blocks) = self
            .line
            .query_selector_all(&format!(".{ASCII_CONTENT_CLASS}"))
        else {
            return;
        };
        for i in 0..blocks.length() {
            if self.rng.gen::<f32>() < chance {
                if let Some(node) = blocks.get(i) {
                    let code = generate_code(&mut self.rng, cols, rows);
                    node.set_text_content(Some(&code));
                }
            }
        }
    }
}

fn set_var(wrapper: &web::Element, selector: &str, var: &str, percent: f32) {
    if let Some(face) = wrapper
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        dom::set_style(&face, var, &clip_value(percent));
    }
}

fn flash_scan_effect(wrapper: &web::Element) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let Ok(effect) = dom::create::<web::Element>(&document, "div", SCAN_EFFECT_CLASS) else {
        return;
    };
    if wrapper.append_child(&effect).is_err() {
        return;
    }
    let remove = Closure::once_into_js(move || effect.remove());
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            SCAN_EFFECT_MS,
        );
    }
}

/// Page-owned handle to a running card stream.
#[wasm_bindgen]
pub struct CardStreamHandle {
    view: Rc<RefCell<CardStreamView>>,
    frames: Option<FrameLoop>,
    listeners: Vec<Listener>,
    refresh: Option<(i32, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl CardStreamHandle {
    pub fn position(&self) -> f32 {
        self.view.borrow().stream.position()
    }

    /// Stop animating, detach every listener and cancel the code refresh.
    pub fn destroy(&mut self) {
        let Some(frames) = self.frames.take() else {
            return;
        };
        frames.stop();
        self.listeners.clear();
        if let Some((id, _closure)) = self.refresh.take() {
            if let Some(w) = web::window() {
                w.clear_interval_with_handle(id);
            }
        }
        log::info!("[cards] destroyed");
    }
}

impl Drop for CardStreamHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Build the card line inside `#line_id` and start it scrolling across
/// `#container_id`. Returns `undefined` when either element is missing.
#[wasm_bindgen(js_name = mountCardStream)]
pub fn mount_card_stream(
    container_id: Option<String>,
    line_id: Option<String>,
    config_json: Option<String>,
) -> Option<CardStreamHandle> {
    let container_id = container_id.as_deref().unwrap_or(CARD_STREAM_ID);
    let line_id = line_id.as_deref().unwrap_or(CARD_LINE_ID);
    match mount(container_id, line_id, config_json.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("[cards] not started: {e}");
            None
        }
    }
}

fn mount(
    container_id: &str,
    line_id: &str,
    config_json: Option<&str>,
) -> anyhow::Result<CardStreamHandle> {
    let config = match config_json {
        Some(json) => serde_json::from_str::<CardStreamConfig>(json)?,
        None => CardStreamConfig::default(),
    };
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let container: web::HtmlElement = dom::element_by_id(&document, container_id)?;
    let line: web::HtmlElement = dom::element_by_id(&document, line_id)?;

    let mut rng = StdRng::from_entropy();
    populate(&document, &line, &config, &mut rng)?;

    let card_count = config.card_count;
    let stream = CardStream::new(config, 0.0)?;
    let view = Rc::new(RefCell::new(CardStreamView {
        stream,
        container,
        line: line.clone(),
        rng,
        last_instant: Instant::now(),
    }));
    {
        let mut v = view.borrow_mut();
        v.on_resize();
        v.apply_position();
        v.update_clipping();
    }

    let listeners = wire_drag(&document, &window, &line, &view);

    let view_refresh = view.clone();
    let refresh_cb = Closure::wrap(Box::new(move || {
        view_refresh.borrow_mut().refresh_code();
    }) as Box<dyn FnMut()>);
    let refresh = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            refresh_cb.as_ref().unchecked_ref(),
            CODE_REFRESH_MS,
        )
        .ok()
        .map(|id| (id, refresh_cb));

    let view_tick = view.clone();
    let frames = FrameLoop::start(move |_| view_tick.borrow_mut().frame());

    log::info!("[cards] mounted {card_count} cards on #{line_id}");
    Ok(CardStreamHandle {
        view,
        frames: Some(frames),
        listeners,
        refresh,
    })
}

fn populate(
    document: &web::Document,
    line: &web::HtmlElement,
    config: &CardStreamConfig,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    line.set_inner_html("");
    for i in 0..config.card_count {
        let wrapper: web::Element = dom::create(document, "div", CARD_WRAPPER_CLASS)?;

        let normal: web::HtmlElement = dom::create(document, "div", CARD_NORMAL_CLASS)?;
        let image: web::HtmlImageElement = dom::create(document, "img", CARD_IMAGE_CLASS)?;
        image.set_src(&card_image_url(i));
        let (image_err, normal_err) = (image.clone(), normal.clone());
        let on_error = Closure::once_into_js(move || {
            dom::set_style(&image_err, "display", "none");
            dom::set_style(&normal_err, "background", CARD_FALLBACK_BACKGROUND);
        });
        image.set_onerror(Some(on_error.unchecked_ref()));
        normal
            .append_child(&image)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let ascii: web::Element = dom::create(document, "div", CARD_ASCII_CLASS)?;
        let content: web::Element = dom::create(document, "div", ASCII_CONTENT_CLASS)?;
        let code = generate_code(rng, config.code_cols as usize, config.code_rows as usize);
        content.set_text_content(Some(&code));
        ascii
            .append_child(&content)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        wrapper
            .append_child(&normal)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        wrapper
            .append_child(&ascii)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        line.append_child(&wrapper)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn pointer_x(ev: &web::Event) -> Option<f32> {
    if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
        return Some(m.client_x() as f32);
    }
    ev.dyn_ref::<web::TouchEvent>()
        .and_then(|t| t.touches().get(0))
        .map(|touch| touch.client_x() as f32)
}

fn wire_drag(
    document: &web::Document,
    window: &web::Window,
    line: &web::HtmlElement,
    view: &Rc<RefCell<CardStreamView>>,
) -> Vec<Listener> {
    let start = |view: Rc<RefCell<CardStreamView>>| {
        move |ev: web::Event| {
            let Some(x) = pointer_x(&ev) else {
                return;
            };
            ev.prevent_default();
            let mut v = view.borrow_mut();
            v.stream.begin_drag(x);
            dom::set_style(&v.line, "animation", "none");
            _ = v.line.class_list().add_1(DRAGGING_CLASS);
        }
    };
    let drag = |view: Rc<RefCell<CardStreamView>>| {
        move |ev: web::Event| {
            let Some(x) = pointer_x(&ev) else {
                return;
            };
            let mut v = view.borrow_mut();
            if v.stream.drag_to(x) {
                ev.prevent_default();
                v.apply_position();
                v.update_clipping();
            }
        }
    };
    let end = |view: Rc<RefCell<CardStreamView>>| {
        move |_: web::Event| {
            let mut v = view.borrow_mut();
            if v.stream.end_drag() {
                _ = v.line.class_list().remove_1(DRAGGING_CLASS);
            }
        }
    };

    let view_resize = view.clone();
    vec![
        Listener::new(line, "mousedown", start(view.clone())),
        Listener::new(document, "mousemove", drag(view.clone())),
        Listener::new(document, "mouseup", end(view.clone())),
        Listener::active(line, "touchstart", start(view.clone())),
        Listener::active(document, "touchmove", drag(view.clone())),
        Listener::new(document, "touchend", end(view.clone())),
        Listener::new(window, "resize", move |_| view_resize.borrow_mut().on_resize()),
    ]
}
