// Shared tuning constants for the reveal, scroll and playback engine.

// Pointer sampling
pub const THROTTLE_INTERVAL_MS: f64 = 16.0; // ~60 Hz

// Device classification
pub const MOBILE_MAX_VIEWPORT_WIDTH_PX: f32 = 768.0;

// Proximity reveal
pub const MOBILE_REVEAL_RADIUS_PX: f32 = 220.0;
pub const DESKTOP_REVEAL_RADIUS_PX: f32 = 280.0;
pub const REVEAL_FALLOFF_EXPONENT: f32 = 0.4; // < 1 biases toward early visibility
pub const REVEAL_TRIGGER_THRESHOLD: f32 = 0.3;

// Reveal styling
pub const REVEAL_OPACITY_FLOOR: f32 = 0.1; // keeps hidden text barely legible
pub const MOBILE_MAX_BLUR_PX: f32 = 1.5;
pub const DESKTOP_MAX_BLUR_PX: f32 = 2.0;
pub const BLUR_VISIBLE_MIN_PX: f32 = 0.1; // below this no filter is emitted
pub const REVEAL_BASE_SCALE: f32 = 0.99;
pub const REVEAL_SCALE_DELTA: f32 = 0.01;

// Flashlight overlay
pub const MOBILE_FLASHLIGHT_RADIUS_PX: f32 = 100.0;
pub const DESKTOP_FLASHLIGHT_RADIUS_PX: f32 = 180.0;

// Scroll
pub const INTRO_HIDE_SCROLL_Y_PX: f32 = 100.0;

// Playback
pub const AMBIENT_TRACK_ID: &str = "background";
pub const AMBIENT_START_OFFSET_SEC: f64 = 4.0; // skips the quiet intro every loop
pub const AMBIENT_VOLUME: f64 = 0.15;
pub const AUTOPLAY_SETTLE_DELAY_MS: u32 = 300;
pub const TRACK_VOLUME: f64 = 1.0;

// Haptics
pub const REVEAL_HAPTIC_MS: u32 = 15;
pub const TRACK_SELECT_HAPTIC_MS: u32 = 10;
