use crate::constants::*;
use crate::dom::{self, NavigatorHaptics};
use crate::listeners::ListenerSet;
use lantern_core::constants::TRACK_SELECT_HAPTIC_MS;
use lantern_core::{EngineConfig, Haptics, Playable, PlaybackCoordinator, PlaybackRefused, TrackHandle};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type SharedPlayback = Rc<RefCell<PlaybackCoordinator>>;

/// `<audio>` element driven by the coordinator.
pub struct MediaPlayable {
    id: String,
    element: web::HtmlAudioElement,
    coordinator: Weak<RefCell<PlaybackCoordinator>>,
}

impl MediaPlayable {
    pub fn new(id: String, element: web::HtmlAudioElement, coordinator: &SharedPlayback) -> Self {
        Self {
            id,
            element,
            coordinator: Rc::downgrade(coordinator),
        }
    }
}

impl Playable for MediaPlayable {
    fn play(&self) -> Result<(), PlaybackRefused> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackRefused::new(format!("{:?}", e)))?;
        // The element may still refuse once the promise settles.
        let id = self.id.clone();
        let coordinator = self.coordinator.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::info!("[audio] {} play() rejected: {:?}", id, e);
                let Some(coordinator) = coordinator.upgrade() else {
                    return;
                };
                if let Ok(mut c) = coordinator.try_borrow_mut() {
                    c.start_rejected(&id);
                }
                refresh_track_buttons(&coordinator);
            }
        });
        Ok(())
    }

    fn pause(&self) {
        _ = self.element.pause();
    }

    fn position_sec(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position_sec(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn set_looping(&self, looping: bool) {
        self.element.set_loop(looping);
    }

    fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }
}

/// Register every `<audio data-track-id>` and hook its `ended` event.
pub fn mount_tracks(
    listeners: &mut ListenerSet,
    document: &web::Document,
    coordinator: &SharedPlayback,
    config: &EngineConfig,
) {
    let ambient_id = coordinator.borrow().ambient_id().to_string();
    for el in dom::query_all(document, TRACK_SELECTOR) {
        let Some(id) = el.get_attribute(TRACK_ID_ATTR) else {
            continue;
        };
        let Ok(audio) = el.dyn_into::<web::HtmlAudioElement>() else {
            continue;
        };
        let playable = MediaPlayable::new(id.clone(), audio.clone(), coordinator);
        let handle = if id == ambient_id {
            TrackHandle::ambient(playable, config)
        } else {
            TrackHandle::new(id.clone(), playable)
        };
        coordinator.borrow_mut().register(handle);

        let coordinator = coordinator.clone();
        listeners.listen(audio.as_ref(), "ended", move |_ev: web::Event| {
            coordinator.borrow_mut().on_ended(&id);
            refresh_track_buttons(&coordinator);
        });
    }
    log::info!("[audio] {} tracks registered", coordinator.borrow().len());
}

/// Track buttons toggle their track; the mute button mutes everything.
pub fn wire_controls(
    listeners: &mut ListenerSet,
    document: &web::Document,
    coordinator: &SharedPlayback,
) {
    for el in dom::query_all(document, TRACK_TOGGLE_SELECTOR) {
        let Some(id) = el.get_attribute(TRACK_TOGGLE_ATTR) else {
            continue;
        };
        let coordinator = coordinator.clone();
        listeners.listen(el.as_ref(), "click", move |_ev: web::Event| {
            let now_playing = coordinator.borrow_mut().toggle(&id);
            if now_playing {
                NavigatorHaptics.vibrate(TRACK_SELECT_HAPTIC_MS);
            }
            refresh_track_buttons(&coordinator);
        });
    }

    if let Some(button) = document.get_element_by_id(MUTE_BUTTON_ID) {
        let coordinator = coordinator.clone();
        let button_for_class = button.clone();
        listeners.listen(button.as_ref(), "click", move |_ev: web::Event| {
            let muted = {
                let mut c = coordinator.borrow_mut();
                let muted = !c.is_muted();
                c.set_muted(muted);
                muted
            };
            _ = button_for_class
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, muted);
        });
    }
}

/// Reflect per-track state onto the toggle buttons.
pub fn refresh_track_buttons(coordinator: &SharedPlayback) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let Ok(c) = coordinator.try_borrow() else {
        return;
    };
    for el in dom::query_all(&document, TRACK_TOGGLE_SELECTOR) {
        let playing = el
            .get_attribute(TRACK_TOGGLE_ATTR)
            .map(|id| c.is_playing(&id))
            .unwrap_or(false);
        _ = el.class_list().toggle_with_force(PLAYING_CLASS, playing);
    }
}

/// One-shot ambient autoplay timer. Dropping it clears a timer that has not
/// fired yet.
pub struct AutoplayTimer {
    coordinator: SharedPlayback,
    handle: Rc<Cell<Option<i32>>>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl AutoplayTimer {
    pub fn new(coordinator: SharedPlayback) -> Self {
        Self {
            coordinator,
            handle: Rc::new(Cell::new(None)),
            callback: None,
        }
    }

    /// Forward the host's "may play" signal; schedules the attempt after the
    /// settle delay the first time only.
    pub fn signal(&mut self) {
        let Some(delay_ms) = self.coordinator.borrow_mut().signal_may_play() else {
            return;
        };
        let Some(window) = web::window() else {
            self.coordinator.borrow_mut().cancel_autoplay();
            return;
        };

        let coordinator = self.coordinator.clone();
        let handle = self.handle.clone();
        let callback = Closure::wrap(Box::new(move || {
            handle.set(None);
            coordinator.borrow_mut().run_autoplay();
            refresh_track_buttons(&coordinator);
        }) as Box<dyn FnMut()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(id) => {
                self.handle.set(Some(id));
                self.callback = Some(callback);
            }
            Err(e) => {
                log::error!("[audio] setTimeout failed: {:?}", e);
                self.coordinator.borrow_mut().cancel_autoplay();
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web::window() {
                window.clear_timeout_with_handle(id);
            }
            if let Ok(mut c) = self.coordinator.try_borrow_mut() {
                c.cancel_autoplay();
            }
        }
        self.callback = None;
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
