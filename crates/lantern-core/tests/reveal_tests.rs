// Host-side tests for proximity reveal and the pointer sampling feeding it.

use glam::Vec2;
use lantern_core::*;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct ImmediateFrames {
    next: i32,
}

impl FrameScheduler for ImmediateFrames {
    fn request_frame(&mut self) -> Option<FrameToken> {
        self.next += 1;
        Some(FrameToken(self.next))
    }
    fn cancel_frame(&mut self, _token: FrameToken) {}
}

fn square_at(cx: f32, cy: f32) -> impl Fn() -> Option<Rect> {
    move || Some(Rect::new(cx - 50.0, cy - 20.0, 100.0, 40.0))
}

#[test]
fn visibility_is_monotonic_in_distance() {
    for radius in [MOBILE_REVEAL_RADIUS, DESKTOP_REVEAL_RADIUS] {
        let mut prev = visibility_at(0.0, radius);
        assert!((prev - 1.0).abs() < 1e-6);
        let steps = 400;
        for i in 1..=steps {
            let d = radius * i as f32 / steps as f32;
            let v = visibility_at(d, radius);
            assert!(v <= prev + 1e-6, "visibility rose at d={d}: {prev} -> {v}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
        assert_eq!(visibility_at(radius, radius), 0.0);
        assert_eq!(visibility_at(radius * 3.0, radius), 0.0);
    }
}

const MOBILE_REVEAL_RADIUS: f32 = constants::MOBILE_REVEAL_RADIUS_PX;
const DESKTOP_REVEAL_RADIUS: f32 = constants::DESKTOP_REVEAL_RADIUS_PX;

#[test]
fn falloff_reaches_high_visibility_quickly() {
    // Halfway in, the ease-out curve is already well past the linear value.
    let raw = raw_visibility(140.0, 280.0);
    assert!(raw > 0.7, "raw={raw}");
}

#[test]
fn reveal_fires_once_despite_oscillation() {
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Pointer);
    engine.register("fragment-1", square_at(400.0, 300.0));

    let near = Vec2::new(400.0, 300.0);
    let far = Vec2::new(400.0, 1200.0);
    let mut fired = Vec::new();
    for i in 0..20 {
        let p = if i % 2 == 0 { near } else { far };
        fired.extend(engine.recompute(p));
    }
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].id, "fragment-1");
    assert!(fired[0].first_reveal);
    assert!(engine.target("fragment-1").is_some_and(|t| t.has_triggered()));
    assert_eq!(engine.visibility("fragment-1"), Some(0.0));
}

#[test]
fn trigger_uses_the_smoothed_threshold() {
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Pointer);
    engine.register("t", square_at(0.0, 0.0));
    // Find a distance where smoothed visibility sits just under the threshold.
    let mut d = 0.0;
    while visibility_at(d, 280.0) > 0.3 {
        d += 1.0;
    }
    assert!(engine.recompute(Vec2::new(d, 0.0)).is_empty());
    assert_eq!(engine.recompute(Vec2::new(d - 2.0, 0.0)).len(), 1);
}

#[test]
fn remount_starts_a_new_lifetime_but_is_not_a_first_reveal() {
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Touch);
    engine.register("f", square_at(100.0, 100.0));
    assert_eq!(engine.recompute(Vec2::new(100.0, 100.0)).len(), 1);
    assert!(engine.unregister("f"));

    engine.register("f", square_at(100.0, 100.0));
    let again = engine.recompute(Vec2::new(100.0, 100.0));
    assert_eq!(again.len(), 1);
    assert!(!again[0].first_reveal);
    assert_eq!(engine.revealed_count(), 1);
    assert!(engine.is_revealed("f"));
}

#[test]
fn bounds_are_measured_on_every_pass() {
    let top = Rc::new(Cell::new(0.0_f32));
    let top_for_provider = top.clone();
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Pointer);
    engine.register("scrolling", move || {
        Some(Rect::new(0.0, top_for_provider.get(), 100.0, 40.0))
    });

    engine.recompute(Vec2::new(50.0, 20.0));
    assert!(engine.visibility("scrolling").is_some_and(|v| v > 0.99));

    // Content scrolled up and out of reach.
    top.set(-2000.0);
    engine.recompute(Vec2::new(50.0, 20.0));
    assert_eq!(engine.visibility("scrolling"), Some(0.0));
}

#[test]
fn sampler_output_drives_styles() {
    let mut frames = ImmediateFrames::default();
    let mut sampler = PointerSampler::default();
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Pointer);
    engine.register("a", square_at(200.0, 200.0));
    engine.register("b", square_at(1200.0, 200.0));

    sampler.on_raw_move(205.0, 190.0, 0.0, &mut frames);
    // Dropped by the throttle, the pass must still see the first sample.
    sampler.on_raw_move(1200.0, 200.0, 5.0, &mut frames);
    let sample = sampler.on_frame().expect("sample applied");
    let events = engine.recompute(sample.position());

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "a");
    let a = engine.style("a").unwrap();
    let b = engine.style("b").unwrap();
    assert!(a.opacity > 0.9 && a.blur_px < 0.2);
    assert!((b.opacity - 0.1).abs() < 1e-6);
    assert_eq!(b.filter_css(), "blur(2.00px)");
    assert_eq!(engine.styles().count(), 2);
}

#[test]
fn no_reveal_before_first_pointer_sample() {
    let mut frames = ImmediateFrames::default();
    let mut sampler = PointerSampler::default();
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Pointer);
    engine.register("centered", square_at(640.0, 400.0));

    // Mount and resize passes run before the viewer has moved the pointer.
    assert!(engine.recompute_sampled(sampler.current()).is_empty());
    assert!(engine.recompute_sampled(sampler.current()).is_empty());
    assert_eq!(engine.visibility("centered"), Some(0.0));
    assert!(!engine.target("centered").unwrap().has_triggered());

    sampler.on_raw_move(640.0, 400.0, 0.0, &mut frames);
    sampler.on_frame();
    let events = engine.recompute_sampled(sampler.current());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "centered");
    assert!(events[0].first_reveal);
}

#[derive(Default)]
struct RecordingHaptics {
    pulses: Cell<u32>,
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, duration_ms: u32) -> bool {
        assert_eq!(duration_ms, constants::REVEAL_HAPTIC_MS);
        self.pulses.set(self.pulses.get() + 1);
        true
    }
}

#[test]
fn haptics_pulse_only_on_first_reveal() {
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Touch);
    engine.register("a", square_at(100.0, 100.0));
    engine.register("b", square_at(130.0, 100.0));
    let haptics = RecordingHaptics::default();

    let events = engine.recompute(Vec2::new(115.0, 100.0));
    assert_eq!(events.len(), 2);
    assert_eq!(pulse_first_reveals(&events, &haptics), 2);

    // Remount: the trigger fires again but the id was already revealed.
    engine.register("a", square_at(100.0, 100.0));
    let events = engine.recompute(Vec2::new(100.0, 100.0));
    assert_eq!(events.len(), 1);
    assert!(!events[0].first_reveal);
    assert_eq!(pulse_first_reveals(&events, &haptics), 0);
    assert_eq!(haptics.pulses.get(), 2);
}

#[test]
fn missing_vibration_is_tolerated() {
    let mut engine = ProximityRevealEngine::new(&EngineConfig::default(), DeviceClass::Pointer);
    engine.register("a", square_at(100.0, 100.0));
    let events = engine.recompute(Vec2::new(100.0, 100.0));
    assert_eq!(events.len(), 1);
    assert_eq!(pulse_first_reveals(&events, &NoHaptics), 0);
}

#[test]
fn engine_radius_follows_config() {
    let config = EngineConfig {
        desktop_reveal_radius_px: 500.0,
        ..EngineConfig::default()
    };
    let mut engine = ProximityRevealEngine::new(&config, DeviceClass::Pointer);
    assert_eq!(engine.reveal_radius(), config.reveal_radius(DeviceClass::Pointer));
    engine.register("far", square_at(0.0, 0.0));
    engine.recompute(Vec2::new(400.0, 0.0));
    assert!(engine.visibility("far").is_some_and(|v| v > 0.0));

    engine.set_device_class(DeviceClass::Touch);
    assert_eq!(engine.reveal_radius(), config.mobile_reveal_radius_px);
}
