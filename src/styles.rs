use crate::constants::*;
use crate::dom::set_css_var;
use glam::Vec2;
use lantern_core::{DeviceClass, PointerSample, RevealStyle, ScrollStyle};
use web_sys as web;

/// Write a reveal target's style parameters inline.
pub fn apply_reveal(el: &web::HtmlElement, style: &RevealStyle) {
    let css = el.style();
    _ = css.set_property("opacity", &format!("{:.3}", style.opacity));
    _ = css.set_property("filter", &style.filter_css());
    _ = css.set_property("transform", &style.transform_css());
}

/// Flashlight position follows the pointer sample as viewport percentages.
pub fn apply_flashlight(root: &web::CssStyleDeclaration, sample: &PointerSample, viewport: Vec2) {
    let [x, y] = sample.to_viewport_percent(viewport);
    set_css_var(root, VAR_MOUSE_X, &pct(x));
    set_css_var(root, VAR_MOUSE_Y, &pct(y));
}

pub fn apply_device(root: &web::CssStyleDeclaration, device: DeviceClass) {
    set_css_var(root, VAR_FLASHLIGHT_RADIUS, &px(device.flashlight_radius_px()));
}

pub fn apply_scroll(root: &web::CssStyleDeclaration, style: &ScrollStyle) {
    set_css_var(root, VAR_BACKGROUND, &style.background.to_css());
    set_css_var(root, VAR_SUNRISE_OPACITY, &format!("{:.3}", style.sunrise_opacity));
    set_css_var(
        root,
        VAR_FLASHLIGHT_OPACITY,
        &format!("{:.3}", style.flashlight_opacity),
    );
    set_css_var(root, VAR_PROGRESS_WIDTH, &pct(style.progress_width_pct));
    set_css_var(
        root,
        VAR_PROGRESS_OPACITY,
        &format!("{:.3}", style.progress_opacity),
    );
}
