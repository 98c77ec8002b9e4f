use crate::listeners::ListenerSet;
use crate::scene::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Resize reclassifies the device; scroll drives the progress curves.
pub fn wire_viewport(listeners: &mut ListenerSet, window: &web::Window, scene: Rc<RefCell<Scene>>) {
    let target: &web::EventTarget = window.as_ref();

    {
        let scene = scene.clone();
        let window = window.clone();
        listeners.listen(target, "resize", move |_ev: web::Event| {
            scene.borrow_mut().on_resize(&window);
        });
    }

    let window_for_scroll = window.clone();
    listeners.listen_passive(target, "scroll", move |_ev: web::Event| {
        scene.borrow_mut().on_scroll(&window_for_scroll);
    });
}
