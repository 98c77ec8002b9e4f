use crate::constants::HIDDEN_CLASS;
use glam::Vec2;
use lantern_core::{DeviceClass, Haptics, Rect};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn viewport_size(window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

pub fn has_touch(window: &web::Window) -> bool {
    js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false)
        || window.navigator().max_touch_points() > 0
}

pub fn classify_device(window: &web::Window) -> DeviceClass {
    DeviceClass::classify(viewport_size(window).x, has_touch(window))
}

/// Bounds of `el`, or `None` once it has left the document.
pub fn element_rect(el: &web::Element) -> Option<Rect> {
    if !el.is_connected() {
        return None;
    }
    let r = el.get_bounding_client_rect();
    Some(Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    ))
}

/// Elements matching `selector`, in document order.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn root_style(document: &web::Document) -> Option<web::CssStyleDeclaration> {
    document
        .document_element()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .map(|el| el.style())
}

#[inline]
pub fn set_css_var(style: &web::CssStyleDeclaration, name: &str, value: &str) {
    _ = style.set_property(name, value);
}

pub fn set_hidden(document: &web::Document, element_id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
    }
}

/// `navigator.vibrate` when the browser has it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigatorHaptics;

impl Haptics for NavigatorHaptics {
    fn vibrate(&self, duration_ms: u32) -> bool {
        let Some(window) = web::window() else {
            return false;
        };
        let navigator = window.navigator();
        if !js_sys::Reflect::has(&navigator, &"vibrate".into()).unwrap_or(false) {
            return false;
        }
        navigator.vibrate_with_duration(duration_ms)
    }
}
