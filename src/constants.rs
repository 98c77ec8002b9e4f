/// DOM contract between the page markup and the wasm front-end.
///
/// The markup owns layout; these names are the only coupling. Keeping them in
/// one place lets the host-side tests check the selectors and variable names
/// without a browser.

// Reveal targets: one wrapper per narrative fragment, id in the data attribute
pub const REVEAL_TARGET_SELECTOR: &str = "[data-reveal-id]";
pub const REVEAL_ID_ATTR: &str = "data-reveal-id";

// Audio: every <audio data-track-id="..."> is a selectable track; the ambient
// soundtrack uses the core's ambient id
pub const TRACK_SELECTOR: &str = "audio[data-track-id]";
pub const TRACK_ID_ATTR: &str = "data-track-id";
pub const TRACK_TOGGLE_SELECTOR: &str = "[data-track-toggle]";
pub const TRACK_TOGGLE_ATTR: &str = "data-track-toggle";
pub const MUTE_BUTTON_ID: &str = "mute-toggle";

// Overlays
pub const LOADING_OVERLAY_ID: &str = "loading-screen";
pub const ENTER_BUTTON_ID: &str = "enter-button";
pub const INTRO_BANNER_ID: &str = "intro-banner";

// CSS classes
pub const HIDDEN_CLASS: &str = "hidden";
pub const PLAYING_CLASS: &str = "playing";
pub const ACTIVE_CLASS: &str = "active";

// CSS custom properties written on :root
pub const VAR_MOUSE_X: &str = "--mouse-x";
pub const VAR_MOUSE_Y: &str = "--mouse-y";
pub const VAR_FLASHLIGHT_RADIUS: &str = "--flashlight-radius";
pub const VAR_FLASHLIGHT_OPACITY: &str = "--flashlight-opacity";
pub const VAR_BACKGROUND: &str = "--scene-background";
pub const VAR_SUNRISE_OPACITY: &str = "--sunrise-opacity";
pub const VAR_PROGRESS_WIDTH: &str = "--progress-width";
pub const VAR_PROGRESS_OPACITY: &str = "--progress-opacity";

/// Format a pixel length for a CSS variable.
#[inline]
pub fn px(value: f32) -> String {
    format!("{:.1}px", value)
}

/// Format a percentage for a CSS variable.
#[inline]
pub fn pct(value: f32) -> String {
    format!("{:.2}%", value)
}
