use lantern_core::{FrameScheduler, FrameToken};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame`-backed scheduler for the pointer sampler. The
/// callback is installed once; the sampler decides when a frame is needed.
#[derive(Default)]
pub struct RafScheduler {
    callback: Option<Closure<dyn FnMut()>>,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_callback(&mut self, tick: impl FnMut() + 'static) {
        self.callback = Some(Closure::wrap(Box::new(tick) as Box<dyn FnMut()>));
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameToken> {
        let window = web::window()?;
        let callback = self.callback.as_ref()?;
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => Some(FrameToken(handle)),
            Err(e) => {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some(window) = web::window() {
            _ = window.cancel_animation_frame(token.0);
        }
    }
}
