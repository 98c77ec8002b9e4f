use crate::frame::RafScheduler;
use crate::listeners::ListenerSet;
use crate::scene::Scene;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Client coordinates of the active touches; the sampler only looks at the
/// first one.
fn touch_points(ev: &web::TouchEvent) -> SmallVec<[(f32, f32); 2]> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| (t.client_x() as f32, t.client_y() as f32))
        .collect()
}

/// Mouse and touch movement on the window feed the pointer sampler.
pub fn wire_pointer(
    listeners: &mut ListenerSet,
    window: &web::Window,
    scene: Rc<RefCell<Scene>>,
    raf: Rc<RefCell<RafScheduler>>,
) {
    let target: &web::EventTarget = window.as_ref();

    {
        let scene = scene.clone();
        let raf = raf.clone();
        listeners.listen_passive(target, "mousemove", move |ev: web::Event| {
            if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                let mut raf = raf.borrow_mut();
                scene.borrow_mut().sampler.on_raw_move(
                    ev.client_x() as f32,
                    ev.client_y() as f32,
                    instant::now(),
                    &mut *raf,
                );
            }
        });
    }

    for event in ["touchmove", "touchstart"] {
        let scene = scene.clone();
        let raf = raf.clone();
        listeners.listen_passive(target, event, move |ev: web::Event| {
            if let Some(ev) = ev.dyn_ref::<web::TouchEvent>() {
                let points = touch_points(ev);
                let mut raf = raf.borrow_mut();
                scene
                    .borrow_mut()
                    .sampler
                    .on_touches(&points, instant::now(), &mut *raf);
            }
        });
    }
}
