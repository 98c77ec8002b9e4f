//! Device classification and best-effort haptics.
//!
//! Classification is a pure function of the viewport width and touch
//! capability so it can be recomputed cheaply on every resize.

use crate::constants::{
    DESKTOP_FLASHLIGHT_RADIUS_PX, DESKTOP_MAX_BLUR_PX, MOBILE_FLASHLIGHT_RADIUS_PX,
    MOBILE_MAX_BLUR_PX, MOBILE_MAX_VIEWPORT_WIDTH_PX,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeviceClass {
    Touch,
    #[default]
    Pointer,
}

impl DeviceClass {
    pub fn classify(viewport_width_px: f32, has_touch: bool) -> Self {
        if has_touch || viewport_width_px <= MOBILE_MAX_VIEWPORT_WIDTH_PX {
            DeviceClass::Touch
        } else {
            DeviceClass::Pointer
        }
    }

    pub fn max_blur_px(self) -> f32 {
        match self {
            DeviceClass::Touch => MOBILE_MAX_BLUR_PX,
            DeviceClass::Pointer => DESKTOP_MAX_BLUR_PX,
        }
    }

    pub fn flashlight_radius_px(self) -> f32 {
        match self {
            DeviceClass::Touch => MOBILE_FLASHLIGHT_RADIUS_PX,
            DeviceClass::Pointer => DESKTOP_FLASHLIGHT_RADIUS_PX,
        }
    }
}

/// Optional vibration capability. Implementations return `false` when the
/// platform has no vibration support; callers ignore the result.
pub trait Haptics {
    fn vibrate(&self, duration_ms: u32) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _duration_ms: u32) -> bool {
        false
    }
}
