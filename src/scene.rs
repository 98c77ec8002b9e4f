//! Visual state of the page: pointer sampling, reveal targets and scroll
//! curves, plus the elements their outputs are written to.

use crate::constants::{INTRO_BANNER_ID, REVEAL_ID_ATTR, REVEAL_TARGET_SELECTOR};
use crate::dom::{self, NavigatorHaptics};
use crate::styles;
use glam::Vec2;
use lantern_core::{
    intro_visible, pulse_first_reveals, scroll_fraction, CurveError, DeviceClass, EngineConfig,
    PointerSampler, ProximityRevealEngine, ScrollProgressMapper,
};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Scene {
    pub sampler: PointerSampler,
    reveal: ProximityRevealEngine,
    scroll: ScrollProgressMapper,
    targets: Vec<(String, web::HtmlElement)>,
    root_style: Option<web::CssStyleDeclaration>,
    haptics: NavigatorHaptics,
    viewport: Vec2,
}

impl Scene {
    pub fn new(config: &EngineConfig, window: &web::Window) -> Result<Self, CurveError> {
        let device = dom::classify_device(window);
        let scene = Self {
            sampler: PointerSampler::new(config.throttle_interval_ms),
            reveal: ProximityRevealEngine::new(config, device),
            scroll: ScrollProgressMapper::standard()?,
            targets: Vec::new(),
            root_style: window.document().as_ref().and_then(dom::root_style),
            haptics: NavigatorHaptics,
            viewport: dom::viewport_size(window),
        };
        if let Some(root) = &scene.root_style {
            styles::apply_device(root, device);
        }
        Ok(scene)
    }

    /// Register every reveal wrapper present in the document.
    pub fn mount_targets(&mut self, document: &web::Document) {
        for el in dom::query_all(document, REVEAL_TARGET_SELECTOR) {
            let Some(id) = el.get_attribute(REVEAL_ID_ATTR) else {
                continue;
            };
            let Ok(html) = el.clone().dyn_into::<web::HtmlElement>() else {
                continue;
            };
            self.reveal.register(id.clone(), move || dom::element_rect(&el));
            self.targets.push((id, html));
        }
        log::info!("[reveal] mounted {} targets", self.reveal.len());
        self.recompute_reveal();
    }

    pub fn unmount_targets(&mut self) {
        for (id, _) in self.targets.drain(..) {
            self.reveal.unregister(&id);
        }
    }

    /// Animation-frame callback: apply the pending pointer sample and run one
    /// reveal pass against it.
    pub fn on_frame(&mut self) {
        let Some(sample) = self.sampler.on_frame() else {
            return;
        };
        if let Some(root) = &self.root_style {
            styles::apply_flashlight(root, &sample, self.viewport);
        }
        self.recompute_reveal();
    }

    fn recompute_reveal(&mut self) {
        let events = self.reveal.recompute_sampled(self.sampler.current());
        pulse_first_reveals(&events, &self.haptics);
        for (id, el) in &self.targets {
            if let Some(style) = self.reveal.style(id) {
                styles::apply_reveal(el, &style);
            }
        }
    }

    /// Viewport changed: reclassify the device and refresh dependent output.
    pub fn on_resize(&mut self, window: &web::Window) {
        self.viewport = dom::viewport_size(window);
        let device: DeviceClass = dom::classify_device(window);
        if self.reveal.set_device_class(device) {
            if let Some(root) = &self.root_style {
                styles::apply_device(root, device);
            }
        }
        self.recompute_reveal();
        self.on_scroll(window);
    }

    pub fn on_scroll(&mut self, window: &web::Window) {
        let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
        let document_height = window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| el.scroll_height() as f32)
            .unwrap_or(0.0);
        let progress = scroll_fraction(scroll_y, document_height, self.viewport.y);

        if let Some(style) = self.scroll.update(progress) {
            if let Some(root) = &self.root_style {
                styles::apply_scroll(root, &style);
            }
        }
        if let Some(document) = window.document() {
            dom::set_hidden(&document, INTRO_BANNER_ID, !intro_visible(scroll_y));
        }
    }
}
