//! Throttled pointer/touch sampling.
//!
//! Raw move events are rate limited to the throttle interval and applied on the
//! next animation frame. A single pending-frame token coalesces bursts: while a
//! frame is outstanding newer accepted samples replace the pending one instead
//! of requesting another frame.

use glam::Vec2;

/// Handle returned by a [`FrameScheduler`] for a requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(pub i32);

/// Animation-frame scheduling seam. The web front-end backs this with
/// `requestAnimationFrame` / `cancelAnimationFrame`.
pub trait FrameScheduler {
    /// Request a callback on the next frame boundary. `None` means the host
    /// could not schedule one.
    fn request_frame(&mut self) -> Option<FrameToken>;
    fn cancel_frame(&mut self, token: FrameToken);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
}

impl PointerSample {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Position as a percentage of the viewport, the form consumed by CSS.
    pub fn to_viewport_percent(&self, viewport: Vec2) -> [f32; 2] {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return [50.0, 50.0];
        }
        [
            (self.x / viewport.x * 100.0).clamp(0.0, 100.0),
            (self.y / viewport.y * 100.0).clamp(0.0, 100.0),
        ]
    }
}

#[derive(Debug)]
pub struct PointerSampler {
    throttle_interval_ms: f64,
    last_accepted_ms: Option<f64>,
    pending: Option<PointerSample>,
    pending_frame: Option<FrameToken>,
    current: Option<PointerSample>,
}

impl PointerSampler {
    pub fn new(throttle_interval_ms: f64) -> Self {
        Self {
            throttle_interval_ms,
            last_accepted_ms: None,
            pending: None,
            pending_frame: None,
            current: None,
        }
    }

    /// Feed a raw pointer position. Returns `true` if the sample passed the
    /// throttle and is now pending for the next frame.
    pub fn on_raw_move<S: FrameScheduler + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        now_ms: f64,
        scheduler: &mut S,
    ) -> bool {
        if !x.is_finite() || !y.is_finite() || (x == 0.0 && y == 0.0) {
            return false;
        }
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < self.throttle_interval_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        self.pending = Some(PointerSample {
            x,
            y,
            timestamp_ms: now_ms,
        });

        if self.pending_frame.is_none() {
            match scheduler.request_frame() {
                Some(token) => self.pending_frame = Some(token),
                None => {
                    log::warn!("[pointer] frame request failed; applying sample immediately");
                    self.apply_pending();
                }
            }
        }
        true
    }

    /// Feed a touch event's active touches; only the first one is sampled.
    pub fn on_touches<S: FrameScheduler + ?Sized>(
        &mut self,
        touches: &[(f32, f32)],
        now_ms: f64,
        scheduler: &mut S,
    ) -> bool {
        match touches.first() {
            Some(&(x, y)) => self.on_raw_move(x, y, now_ms, scheduler),
            None => false,
        }
    }

    /// Frame callback: promote the pending sample to current. Returns the newly
    /// applied sample, if any.
    pub fn on_frame(&mut self) -> Option<PointerSample> {
        self.pending_frame = None;
        self.apply_pending()
    }

    fn apply_pending(&mut self) -> Option<PointerSample> {
        let sample = self.pending.take()?;
        self.current = Some(sample);
        Some(sample)
    }

    /// Cancel any outstanding frame request and drop the pending sample.
    pub fn teardown<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(token) = self.pending_frame.take() {
            scheduler.cancel_frame(token);
        }
        self.pending = None;
    }

    pub fn current(&self) -> Option<PointerSample> {
        self.current
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }
}

impl Default for PointerSampler {
    fn default() -> Self {
        Self::new(crate::constants::THROTTLE_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        next: i32,
        requested: Vec<FrameToken>,
        cancelled: Vec<FrameToken>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) -> Option<FrameToken> {
            self.next += 1;
            let t = FrameToken(self.next);
            self.requested.push(t);
            Some(t)
        }
        fn cancel_frame(&mut self, token: FrameToken) {
            self.cancelled.push(token);
        }
    }

    #[test]
    fn samples_inside_throttle_window_are_dropped() {
        let mut s = PointerSampler::default();
        let mut sched = CountingScheduler::default();
        assert!(s.on_raw_move(10.0, 10.0, 1000.0, &mut sched));
        assert!(!s.on_raw_move(20.0, 20.0, 1010.0, &mut sched));
        assert!(s.on_raw_move(30.0, 30.0, 1016.0, &mut sched));
    }

    #[test]
    fn pending_frame_is_coalesced_and_latest_sample_wins() {
        let mut s = PointerSampler::default();
        let mut sched = CountingScheduler::default();
        s.on_raw_move(10.0, 10.0, 0.0, &mut sched);
        s.on_raw_move(40.0, 50.0, 20.0, &mut sched);
        assert_eq!(sched.requested.len(), 1);
        assert_eq!(s.current(), None);

        let applied = s.on_frame().map(|p| (p.x, p.y));
        assert_eq!(applied, Some((40.0, 50.0)));
        assert!(!s.has_pending_frame());

        s.on_raw_move(60.0, 60.0, 40.0, &mut sched);
        assert_eq!(sched.requested.len(), 2);
    }

    #[test]
    fn teardown_cancels_outstanding_frame() {
        let mut s = PointerSampler::default();
        let mut sched = CountingScheduler::default();
        s.on_raw_move(10.0, 10.0, 0.0, &mut sched);
        s.teardown(&mut sched);
        assert_eq!(sched.cancelled, vec![FrameToken(1)]);
        assert_eq!(s.on_frame(), None);
    }

    #[test]
    fn malformed_input_is_ignored() {
        let mut s = PointerSampler::default();
        let mut sched = CountingScheduler::default();
        assert!(!s.on_touches(&[], 0.0, &mut sched));
        assert!(!s.on_raw_move(0.0, 0.0, 0.0, &mut sched));
        assert!(!s.on_raw_move(f32::NAN, 5.0, 0.0, &mut sched));
        assert!(sched.requested.is_empty());
        assert_eq!(s.current(), None);
    }

    #[test]
    fn viewport_percent_is_clamped() {
        let p = PointerSample {
            x: 1200.0,
            y: 150.0,
            timestamp_ms: 0.0,
        };
        assert_eq!(p.to_viewport_percent(Vec2::new(1000.0, 600.0)), [100.0, 25.0]);
    }
}
