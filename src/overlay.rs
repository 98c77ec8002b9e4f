use crate::audio::AutoplayTimer;
use crate::constants::{ENTER_BUTTON_ID, HIDDEN_CLASS, LOADING_OVERLAY_ID};
use crate::listeners::ListenerSet;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("aria-hidden", "true");
    }
}

/// A page without a loading screen counts as already entered.
#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(LOADING_OVERLAY_ID)
        .map(|el| el.class_list().contains(HIDDEN_CLASS))
        .unwrap_or(true)
}

/// The enter button dismisses the loading screen; that click is the user
/// gesture the ambient soundtrack waits for.
pub fn wire_enter(
    listeners: &mut ListenerSet,
    document: &web::Document,
    autoplay: Rc<RefCell<AutoplayTimer>>,
) {
    if is_hidden(document) {
        autoplay.borrow_mut().signal();
        return;
    }
    let Some(button) = document.get_element_by_id(ENTER_BUTTON_ID) else {
        log::warn!("[overlay] #{} missing; entering directly", ENTER_BUTTON_ID);
        hide(document);
        autoplay.borrow_mut().signal();
        return;
    };
    let doc = document.clone();
    listeners.listen(button.as_ref(), "click", move |_ev: web::Event| {
        hide(&doc);
        autoplay.borrow_mut().signal();
    });
}
