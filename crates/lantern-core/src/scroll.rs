//! Scroll-progress curves.
//!
//! One normalized scroll fraction feeds several independent piecewise-linear
//! curves. Numeric outputs interpolate directly, colors per channel.

use crate::constants::INTRO_HIDE_SCROLL_Y_PX;
use crate::error::CurveError;

/// Values a curve can interpolate between.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// RGB color with channels in 0..=255.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(f32::from);
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgb({}, {}, {})",
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8
        )
    }
}

impl Lerp for Rgb {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r.lerp(other.r, t),
            g: self.g.lerp(other.g, t),
            b: self.b.lerp(other.b, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollCurve<T> {
    breakpoints: Vec<f32>,
    outputs: Vec<T>,
}

impl<T: Lerp> ScrollCurve<T> {
    pub fn new(breakpoints: Vec<f32>, outputs: Vec<T>) -> Result<Self, CurveError> {
        if breakpoints.is_empty() {
            return Err(CurveError::Empty);
        }
        if breakpoints.len() != outputs.len() {
            return Err(CurveError::LengthMismatch {
                breakpoints: breakpoints.len(),
                outputs: outputs.len(),
            });
        }
        for (index, &value) in breakpoints.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(CurveError::OutOfRange { index, value });
            }
            if index > 0 && value <= breakpoints[index - 1] {
                return Err(CurveError::NotIncreasing { index, value });
            }
        }
        Ok(Self {
            breakpoints,
            outputs,
        })
    }

    pub fn breakpoints(&self) -> &[f32] {
        &self.breakpoints
    }

    pub fn sample(&self, progress: f32) -> T {
        interpolate(self, progress)
    }
}

/// Evaluate `curve` at `progress`, clamped to [0, 1] first.
pub fn interpolate<T: Lerp>(curve: &ScrollCurve<T>, progress: f32) -> T {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let bps = &curve.breakpoints;
    let outs = &curve.outputs;
    let last = bps.len() - 1;

    if p <= bps[0] {
        return outs[0];
    }
    if p >= bps[last] {
        return outs[last];
    }
    // First breakpoint strictly above p; p > bps[0] so i >= 1.
    let i = bps.partition_point(|&b| b <= p);
    let (b0, b1) = (bps[i - 1], bps[i]);
    let t = (p - b0) / (b1 - b0);
    outs[i - 1].lerp(outs[i], t)
}

/// Fraction of the scrollable distance covered; 0 when nothing can scroll.
pub fn scroll_fraction(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if !(scrollable > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// The intro banner stays up until the viewer has scrolled a little.
#[inline]
pub fn intro_visible(scroll_y: f32) -> bool {
    scroll_y <= INTRO_HIDE_SCROLL_Y_PX
}

/// All global style parameters derived from one progress value.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollStyle {
    pub progress: f32,
    pub background: Rgb,
    pub sunrise_opacity: f32,
    pub flashlight_opacity: f32,
    pub progress_width_pct: f32,
    pub progress_opacity: f32,
}

#[derive(Clone, Debug)]
pub struct ScrollProgressMapper {
    background: ScrollCurve<Rgb>,
    sunrise_opacity: ScrollCurve<f32>,
    flashlight_opacity: ScrollCurve<f32>,
    progress_width_pct: ScrollCurve<f32>,
    progress_opacity: ScrollCurve<f32>,
    last_progress: Option<f32>,
}

const FOREST: Rgb = Rgb::new(6.0, 44.0, 23.0); // #062c17
const DAWN_FOREST: Rgb = Rgb::new(10.0, 61.0, 34.0); // #0a3d22

impl ScrollProgressMapper {
    pub fn new(
        background: ScrollCurve<Rgb>,
        sunrise_opacity: ScrollCurve<f32>,
        flashlight_opacity: ScrollCurve<f32>,
        progress_width_pct: ScrollCurve<f32>,
        progress_opacity: ScrollCurve<f32>,
    ) -> Self {
        Self {
            background,
            sunrise_opacity,
            flashlight_opacity,
            progress_width_pct,
            progress_opacity,
            last_progress: None,
        }
    }

    /// The presentation's curve set: a late dawn tint, a sunrise overlay, the
    /// flashlight fading out as the sun comes up, and the progress bar.
    pub fn standard() -> Result<Self, CurveError> {
        Ok(Self::new(
            ScrollCurve::new(vec![0.0, 0.85, 1.0], vec![FOREST, FOREST, DAWN_FOREST])?,
            ScrollCurve::new(vec![0.82, 0.92, 1.0], vec![0.0, 0.4, 0.7])?,
            ScrollCurve::new(vec![0.0, 0.85, 0.95], vec![1.0, 1.0, 0.0])?,
            ScrollCurve::new(vec![0.0, 1.0], vec![0.0, 100.0])?,
            ScrollCurve::new(vec![0.0, 0.85, 0.95], vec![0.6, 0.6, 0.0])?,
        ))
    }

    pub fn evaluate(&self, progress: f32) -> ScrollStyle {
        ScrollStyle {
            progress: progress.clamp(0.0, 1.0),
            background: self.background.sample(progress),
            sunrise_opacity: self.sunrise_opacity.sample(progress),
            flashlight_opacity: self.flashlight_opacity.sample(progress),
            progress_width_pct: self.progress_width_pct.sample(progress),
            progress_opacity: self.progress_opacity.sample(progress),
        }
    }

    /// Evaluate only when progress moved since the last update.
    pub fn update(&mut self, progress: f32) -> Option<ScrollStyle> {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if self.last_progress == Some(p) {
            return None;
        }
        self.last_progress = Some(p);
        log::trace!("[scroll] progress {:.3}", p);
        Some(self.evaluate(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(Rgb::from_hex("#062c17"), Some(FOREST));
        assert_eq!(Rgb::from_hex("0a3d22"), Some(DAWN_FOREST));
        assert_eq!(Rgb::from_hex("#0a3d2"), None);
        assert_eq!(Rgb::from_hex("#zz3d22"), None);
    }

    #[test]
    fn colors_interpolate_per_channel() {
        let c = ScrollCurve::new(
            vec![0.0, 1.0],
            vec![Rgb::new(0.0, 100.0, 200.0), Rgb::new(100.0, 100.0, 0.0)],
        )
        .unwrap();
        assert_eq!(c.sample(0.5), Rgb::new(50.0, 100.0, 100.0));
        assert_eq!(c.sample(0.5).to_css(), "rgb(50, 100, 100)");
    }

    #[test]
    fn malformed_curves_are_rejected() {
        assert_eq!(
            ScrollCurve::<f32>::new(vec![], vec![]).unwrap_err(),
            CurveError::Empty
        );
        assert!(matches!(
            ScrollCurve::new(vec![0.0, 0.5], vec![1.0]),
            Err(CurveError::LengthMismatch { .. })
        ));
        assert!(matches!(
            ScrollCurve::new(vec![0.5, 0.5], vec![1.0, 2.0]),
            Err(CurveError::NotIncreasing { index: 1, .. })
        ));
        assert!(matches!(
            ScrollCurve::new(vec![0.0, 1.5], vec![1.0, 2.0]),
            Err(CurveError::OutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn update_skips_unchanged_progress() {
        let mut m = ScrollProgressMapper::standard().unwrap();
        assert!(m.update(0.3).is_some());
        assert!(m.update(0.3).is_none());
        assert!(m.update(0.31).is_some());
    }

    #[test]
    fn fraction_handles_short_documents() {
        assert_eq!(scroll_fraction(0.0, 500.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(600.0, 1400.0, 800.0), 1.0);
        assert!((scroll_fraction(300.0, 1400.0, 800.0) - 0.5).abs() < 1e-6);
        assert!(intro_visible(100.0));
        assert!(!intro_visible(101.0));
    }
}
