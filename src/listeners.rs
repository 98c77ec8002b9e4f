use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Registration {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Owns every DOM listener closure of the runtime. Dropping the set removes
/// the listeners, so no callback outlives the state it touches.
#[derive(Default)]
pub struct ListenerSet {
    registrations: Vec<Registration>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.add(target, event, handler, false);
    }

    /// Passive listener for high-frequency input (move, touch, scroll).
    pub fn listen_passive(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.add(target, event, handler, true);
    }

    fn add(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
        passive: bool,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let result = if passive {
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
        } else {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        };
        if let Err(e) = result {
            log::error!("[dom] addEventListener({}) failed: {:?}", event, e);
            return;
        }
        self.registrations.push(Registration {
            target: target.clone(),
            event,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn clear(&mut self) {
        for r in self.registrations.drain(..) {
            _ = r
                .target
                .remove_event_listener_with_callback(r.event, r.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
