//! Proximity-driven reveal of text targets.
//!
//! Each registered target is measured on every pass, its center compared with
//! the current pointer position, and the distance mapped through an ease-out
//! falloff followed by smoothstep. The result drives opacity, blur and scale.
//! Crossing the trigger threshold latches the target and emits one reveal
//! event for the target's lifetime.

use crate::config::EngineConfig;
use crate::constants::{
    BLUR_VISIBLE_MIN_PX, REVEAL_BASE_SCALE, REVEAL_FALLOFF_EXPONENT, REVEAL_HAPTIC_MS,
    REVEAL_OPACITY_FLOOR, REVEAL_SCALE_DELTA,
};
use crate::device::{DeviceClass, Haptics};
use crate::pointer::PointerSample;
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec2;
use smallvec::SmallVec;

/// Viewport-space rectangle as reported by layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Zero-sized or non-finite rects come from detached or hidden elements.
    pub fn is_measurable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Source of a target's current bounds. `None` means the target cannot be
/// measured right now.
pub trait BoundsProvider {
    fn bounds(&self) -> Option<Rect>;
}

impl<F> BoundsProvider for F
where
    F: Fn() -> Option<Rect>,
{
    fn bounds(&self) -> Option<Rect> {
        self()
    }
}

/// Ease-out falloff: 0 at or beyond `radius`, rising to 1 at the center.
#[inline]
pub fn raw_visibility(distance: f32, radius: f32) -> f32 {
    if !(distance < radius) || radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).max(0.0).powf(REVEAL_FALLOFF_EXPONENT)
}

#[inline]
pub fn smoothstep(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    v * v * (3.0 - 2.0 * v)
}

/// Smoothed visibility for a pointer at `distance` from a target center.
#[inline]
pub fn visibility_at(distance: f32, radius: f32) -> f32 {
    smoothstep(raw_visibility(distance, radius))
}

/// Numeric style parameters derived from a smoothed visibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    pub blur_px: f32,
    pub scale: f32,
}

impl RevealStyle {
    pub fn from_visibility(smoothed: f32, device: DeviceClass) -> Self {
        let s = smoothed.clamp(0.0, 1.0);
        Self {
            opacity: REVEAL_OPACITY_FLOOR + s * (1.0 - REVEAL_OPACITY_FLOOR),
            blur_px: (1.0 - s) * device.max_blur_px(),
            scale: REVEAL_BASE_SCALE + s * REVEAL_SCALE_DELTA,
        }
    }

    /// CSS `filter` value; negligible blur is dropped entirely.
    pub fn filter_css(&self) -> String {
        if self.blur_px > BLUR_VISIBLE_MIN_PX {
            format!("blur({:.2}px)", self.blur_px)
        } else {
            "none".to_string()
        }
    }

    pub fn transform_css(&self) -> String {
        format!("translate3d(0, 0, 0) scale({:.4})", self.scale)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    pub id: String,
    /// `false` when the id was already revealed by an earlier mount.
    pub first_reveal: bool,
}

pub struct RevealTarget {
    id: String,
    bounds: Box<dyn BoundsProvider>,
    visibility: f32,
    has_triggered: bool,
}

impl RevealTarget {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn visibility(&self) -> f32 {
        self.visibility
    }

    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }
}

impl std::fmt::Debug for RevealTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealTarget")
            .field("id", &self.id)
            .field("visibility", &self.visibility)
            .field("has_triggered", &self.has_triggered)
            .finish()
    }
}

pub type RevealEvents = SmallVec<[RevealEvent; 4]>;

/// Pulse once per first-ever reveal in `events`. Returns how many pulses the
/// platform accepted.
pub fn pulse_first_reveals(events: &[RevealEvent], haptics: &impl Haptics) -> usize {
    events
        .iter()
        .filter(|ev| ev.first_reveal)
        .filter(|_| haptics.vibrate(REVEAL_HAPTIC_MS))
        .count()
}

pub struct ProximityRevealEngine {
    config: EngineConfig,
    device: DeviceClass,
    targets: Vec<RevealTarget>,
    index: FnvHashMap<String, usize>,
    revealed: FnvHashSet<String>,
}

impl ProximityRevealEngine {
    pub fn new(config: &EngineConfig, device: DeviceClass) -> Self {
        Self {
            config: config.clone(),
            device,
            targets: Vec::new(),
            index: FnvHashMap::default(),
            revealed: FnvHashSet::default(),
        }
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Returns `true` if the class changed.
    pub fn set_device_class(&mut self, device: DeviceClass) -> bool {
        if self.device == device {
            return false;
        }
        log::info!("[reveal] device class {:?} -> {:?}", self.device, device);
        self.device = device;
        true
    }

    pub fn reveal_radius(&self) -> f32 {
        self.config.reveal_radius(self.device)
    }

    /// Register a target on mount. Re-registering an id starts a new lifetime
    /// with a fresh trigger latch.
    pub fn register(&mut self, id: impl Into<String>, bounds: impl BoundsProvider + 'static) {
        let id = id.into();
        let target = RevealTarget {
            id: id.clone(),
            bounds: Box::new(bounds),
            visibility: 0.0,
            has_triggered: false,
        };
        match self.index.get(&id) {
            Some(&i) => self.targets[i] = target,
            None => {
                self.index.insert(id, self.targets.len());
                self.targets.push(target);
            }
        }
    }

    /// Drop a target on unmount. Returns `false` for unknown ids.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(i) = self.index.remove(id) else {
            return false;
        };
        self.targets.swap_remove(i);
        if let Some(moved) = self.targets.get(i) {
            self.index.insert(moved.id.clone(), i);
        }
        true
    }

    /// Recompute every target against one pointer position and return the
    /// reveal events fired during this pass.
    pub fn recompute(&mut self, pointer: Vec2) -> RevealEvents {
        let radius = self.reveal_radius();
        let trigger = self.config.trigger_threshold;
        let mut events = RevealEvents::new();
        for target in self.targets.iter_mut() {
            let Some(rect) = target.bounds.bounds().filter(Rect::is_measurable) else {
                continue;
            };
            let distance = pointer.distance(rect.center());
            target.visibility = visibility_at(distance, radius);

            if target.visibility > trigger && !target.has_triggered {
                target.has_triggered = true;
                let first_reveal = self.revealed.insert(target.id.clone());
                log::debug!("[reveal] {} revealed (first={})", target.id, first_reveal);
                events.push(RevealEvent {
                    id: target.id.clone(),
                    first_reveal,
                });
            }
        }
        events
    }

    /// Pass driven by the sampler's latest applied sample. Without one there is
    /// no pointer yet: nothing is measured and no trigger can latch.
    pub fn recompute_sampled(&mut self, sample: Option<PointerSample>) -> RevealEvents {
        match sample {
            Some(s) => self.recompute(s.position()),
            None => RevealEvents::new(),
        }
    }

    pub fn target(&self, id: &str) -> Option<&RevealTarget> {
        self.index.get(id).map(|&i| &self.targets[i])
    }

    pub fn visibility(&self, id: &str) -> Option<f32> {
        self.target(id).map(|t| t.visibility)
    }

    pub fn style(&self, id: &str) -> Option<RevealStyle> {
        self.target(id)
            .map(|t| RevealStyle::from_visibility(t.visibility, self.device))
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, RevealStyle)> + '_ {
        self.targets.iter().map(move |t| {
            (
                t.id.as_str(),
                RevealStyle::from_visibility(t.visibility, self.device),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
