#![cfg(target_arch = "wasm32")]
use lantern_core::{EngineConfig, PlaybackCoordinator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod lifecycle;
mod listeners;
mod overlay;
mod scene;
mod styles;

use audio::{AutoplayTimer, SharedPlayback};
use frame::RafScheduler;
use lifecycle::{lifecycle_action, LifecycleAction, PageTransition};
use listeners::ListenerSet;
use scene::Scene;

/// Everything a mounted page owns. Dropping it detaches the page.
struct Runtime {
    listeners: ListenerSet,
    scene: Rc<RefCell<Scene>>,
    raf: Rc<RefCell<RafScheduler>>,
    playback: SharedPlayback,
    autoplay: Rc<RefCell<AutoplayTimer>>,
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.listeners.clear();
        if let (Ok(mut scene), Ok(mut raf)) = (self.scene.try_borrow_mut(), self.raf.try_borrow_mut()) {
            scene.sampler.teardown(&mut *raf);
            scene.unmount_targets();
        }
        if let Ok(mut autoplay) = self.autoplay.try_borrow_mut() {
            autoplay.cancel();
        }
        if let Ok(playback) = self.playback.try_borrow() {
            log::info!(
                "[app] torn down ({} tracks, autoplay {:?})",
                playback.len(),
                playback.autoplay_state()
            );
        }
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lantern-web starting");

    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Lives for the whole page, outside the runtime it may recreate.
    let on_pageshow = Closure::wrap(Box::new(move |ev: web::Event| {
        if on_transition(PageTransition::Show { persisted: persisted(&ev) }) == LifecycleAction::Mount {
            log::info!("[app] restored from back/forward cache without runtime; remounting");
            spawn_local(async { run_init() });
        }
    }) as Box<dyn FnMut(web::Event)>);
    window.add_event_listener_with_callback("pageshow", on_pageshow.as_ref().unchecked_ref())?;
    on_pageshow.forget();

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || spawn_local(async { run_init() }));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        spawn_local(async { run_init() });
    }
    Ok(())
}

/// Detach every listener, pending frame and timer. Safe to call twice.
#[wasm_bindgen]
pub fn shutdown() {
    let runtime = RUNTIME.with(|r| r.borrow_mut().take());
    drop(runtime);
}

fn persisted(ev: &web::Event) -> bool {
    ev.dyn_ref::<web::PageTransitionEvent>()
        .map(|e| e.persisted())
        .unwrap_or(false)
}

fn on_transition(transition: PageTransition) -> LifecycleAction {
    let mounted = RUNTIME.with(|r| r.try_borrow().map(|r| r.is_some()).unwrap_or(true));
    lifecycle_action(transition, mounted)
}

fn run_init() {
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
}

fn init() -> anyhow::Result<()> {
    let config = EngineConfig::default();
    config.validate()?;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let scene = Rc::new(RefCell::new(Scene::new(&config, &window)?));
    let raf = Rc::new(RefCell::new(RafScheduler::new()));
    {
        let scene = scene.clone();
        raf.borrow_mut().set_callback(move || {
            if let Ok(mut s) = scene.try_borrow_mut() {
                s.on_frame();
            }
        });
    }
    let playback: SharedPlayback = Rc::new(RefCell::new(PlaybackCoordinator::new(&config)));
    let autoplay = Rc::new(RefCell::new(AutoplayTimer::new(playback.clone())));

    let mut listeners = ListenerSet::new();
    events::pointer::wire_pointer(&mut listeners, &window, scene.clone(), raf.clone());
    events::viewport::wire_viewport(&mut listeners, &window, scene.clone());
    audio::mount_tracks(&mut listeners, &document, &playback, &config);
    audio::wire_controls(&mut listeners, &document, &playback);
    overlay::wire_enter(&mut listeners, &document, autoplay.clone());

    // A cached page keeps its listeners. Teardown from inside a listener
    // would drop the running closure, so it is deferred.
    listeners.listen(window.as_ref(), "pagehide", |ev: web::Event| {
        match on_transition(PageTransition::Hide { persisted: persisted(&ev) }) {
            LifecycleAction::Teardown => spawn_local(async { shutdown() }),
            _ => log::info!("[app] page cached; runtime kept"),
        }
    });

    {
        let mut s = scene.borrow_mut();
        s.mount_targets(&document);
        s.on_scroll(&window);
    }
    log::info!("[app] mounted with {} listeners", listeners.len());

    let previous = RUNTIME.with(|r| {
        r.borrow_mut().replace(Runtime {
            listeners,
            scene,
            raf,
            playback,
            autoplay,
        })
    });
    drop(previous);
    Ok(())
}
