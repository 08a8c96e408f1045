//! Animatable value types
//!
//! Provides the interpolation contract used by tween properties: numeric
//! types blend linearly, booleans switch once at the midpoint.

/// Trait for values that can be interpolated between a start and an end
pub trait Interpolate: Clone {
    /// Interpolate between self and other by factor t (0.0 to 1.0)
    ///
    /// `t` is eased progress and may leave the 0..1 range (back and elastic
    /// easings overshoot).
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

/// Interpolation function stored on a property: `(progress, start, end) -> value`
pub type Interpolator<T> = fn(f32, &T, &T) -> T;

/// Default [`Interpolator`] for any [`Interpolate`] type
pub fn interpolate<T: Interpolate>(progress: f32, start: &T, end: &T) -> T {
    start.lerp(end, progress)
}

// ============================================================================
// Scalar Implementations
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        (other - self) * t + self
    }
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        (other - self) * t as f64 + self
    }
}

impl Interpolate for i32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let start = *self as f64;
        let end = *other as f64;
        ((end - start) * t as f64 + start).round() as i32
    }
}

/// Booleans cannot blend: the value stays at `start` until progress passes
/// 0.5 and then switches to `end` once.
impl Interpolate for bool {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t > 0.5 {
            *other
        } else {
            *self
        }
    }
}

// ============================================================================
// Color
// ============================================================================

/// RGBA color, each channel nominally 0.0 to 1.0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::rgba(
            self.r.lerp(&other.r, t),
            self.g.lerp(&other.g, t),
            self.b.lerp(&other.b, t),
            self.a.lerp(&other.a, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_lerp() {
        assert_eq!(0.0f32.lerp(&10.0, 0.5), 5.0);
        assert_eq!(2.0f32.lerp(&-2.0, 1.0), -2.0);
        assert_eq!(1.0f64.lerp(&3.0, 0.25), 1.5);
    }

    #[test]
    fn test_float_overshoot() {
        assert!((0.0f32.lerp(&1.0, 1.1) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_int_lerp_rounds() {
        assert_eq!(0i32.lerp(&10, 0.26), 3);
        assert_eq!(0i32.lerp(&10, 1.0), 10);
        assert_eq!(10i32.lerp(&0, 0.5), 5);
    }

    #[test]
    fn test_bool_switches_once_past_midpoint() {
        assert!(!false.lerp(&true, 0.0));
        assert!(!false.lerp(&true, 0.49));
        assert!(!false.lerp(&true, 0.5));
        assert!(false.lerp(&true, 0.51));
        assert!(false.lerp(&true, 1.0));
        assert!(true.lerp(&false, 0.3));
        assert!(!true.lerp(&false, 0.7));
    }

    #[test]
    fn test_color_lerp_per_channel() {
        let mid = Color::BLACK.lerp(&Color::WHITE.with_alpha(0.0), 0.5);
        assert_eq!(mid, Color::rgba(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF0000);
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_interpolator_fn_pointer() {
        let f: Interpolator<f32> = interpolate::<f32>;
        assert_eq!(f(0.25, &0.0, &4.0), 1.0);
    }
}
