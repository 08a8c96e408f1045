//! Easing functions for animations
//!
//! Every named easing has a kebab-case name (`ease-out-bounce`) used by
//! scripts and the CLI. [`Easing::ALL`] lists the named table.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tempo_core::TweenError;

const BACK_FACTOR: f32 = 1.70158;
const ELASTIC_PERIOD: f32 = 0.3;

/// Easing function type
///
/// Maps linear progress (0.0 to 1.0) to eased progress. Named easings
/// satisfy `f(0) = 0` and `f(1) = 1`; back and elastic easings overshoot in
/// between.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    Smooth,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutIn,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseOutInBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseOutInElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    EaseOutInBounce,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseSine,
    ClampStart,
    ClampEnd,
    ClampMiddle,
    CubicBezier(f32, f32, f32, f32),
    /// Any caller-provided function; cannot be named or serialized
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// All named easings, in table order
    pub const ALL: &'static [Easing] = &[
        Easing::Linear,
        Easing::Smooth,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutIn,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutBack,
        Easing::EaseOutInBack,
        Easing::EaseInElastic,
        Easing::EaseOutElastic,
        Easing::EaseInOutElastic,
        Easing::EaseOutInElastic,
        Easing::EaseInBounce,
        Easing::EaseOutBounce,
        Easing::EaseInOutBounce,
        Easing::EaseOutInBounce,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseSine,
        Easing::ClampStart,
        Easing::ClampEnd,
        Easing::ClampMiddle,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Smooth => t * t * (3.0 - 2.0 * t),
            Easing::EaseIn | Easing::EaseInCubic => t * t * t,
            Easing::EaseOut | Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut | Easing::EaseInOutCubic => {
                combine(t, Easing::EaseIn, Easing::EaseOut)
            }
            Easing::EaseOutIn => combine(t, Easing::EaseOut, Easing::EaseIn),
            Easing::EaseInBack => t * t * ((BACK_FACTOR + 1.0) * t - BACK_FACTOR),
            Easing::EaseOutBack => {
                let inv = t - 1.0;
                inv * inv * ((BACK_FACTOR + 1.0) * inv + BACK_FACTOR) + 1.0
            }
            Easing::EaseInOutBack => combine(t, Easing::EaseInBack, Easing::EaseOutBack),
            Easing::EaseOutInBack => combine(t, Easing::EaseOutBack, Easing::EaseInBack),
            Easing::EaseInElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = ELASTIC_PERIOD / 4.0;
                let inv = t - 1.0;
                -(2f32.powf(10.0 * inv)) * ((inv - s) * (2.0 * PI) / ELASTIC_PERIOD).sin()
            }
            Easing::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = ELASTIC_PERIOD / 4.0;
                2f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
            }
            Easing::EaseInOutElastic => {
                combine(t, Easing::EaseInElastic, Easing::EaseOutElastic)
            }
            Easing::EaseOutInElastic => {
                combine(t, Easing::EaseOutElastic, Easing::EaseInElastic)
            }
            Easing::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseInOutBounce => combine(t, Easing::EaseInBounce, Easing::EaseOutBounce),
            Easing::EaseOutInBounce => combine(t, Easing::EaseOutBounce, Easing::EaseInBounce),
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseSine => (t * PI / 2.0).sin(),
            Easing::ClampStart => {
                if t <= 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Easing::ClampEnd => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Easing::ClampMiddle => {
                if t < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(t),
        }
    }

    /// Kebab-case name of a table easing; `None` for bezier and custom easings
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            Easing::Linear => "linear",
            Easing::Smooth => "smooth",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::EaseOutIn => "ease-out-in",
            Easing::EaseInBack => "ease-in-back",
            Easing::EaseOutBack => "ease-out-back",
            Easing::EaseInOutBack => "ease-in-out-back",
            Easing::EaseOutInBack => "ease-out-in-back",
            Easing::EaseInElastic => "ease-in-elastic",
            Easing::EaseOutElastic => "ease-out-elastic",
            Easing::EaseInOutElastic => "ease-in-out-elastic",
            Easing::EaseOutInElastic => "ease-out-in-elastic",
            Easing::EaseInBounce => "ease-in-bounce",
            Easing::EaseOutBounce => "ease-out-bounce",
            Easing::EaseInOutBounce => "ease-in-out-bounce",
            Easing::EaseOutInBounce => "ease-out-in-bounce",
            Easing::EaseInQuad => "ease-in-quad",
            Easing::EaseOutQuad => "ease-out-quad",
            Easing::EaseInOutQuad => "ease-in-out-quad",
            Easing::EaseInCubic => "ease-in-cubic",
            Easing::EaseOutCubic => "ease-out-cubic",
            Easing::EaseInOutCubic => "ease-in-out-cubic",
            Easing::EaseInQuart => "ease-in-quart",
            Easing::EaseOutQuart => "ease-out-quart",
            Easing::EaseInOutQuart => "ease-in-out-quart",
            Easing::EaseSine => "ease-sine",
            Easing::ClampStart => "ease-clamp-start",
            Easing::ClampEnd => "ease-clamp-end",
            Easing::ClampMiddle => "ease-clamp-middle",
            Easing::CubicBezier(..) | Easing::Custom(_) => return None,
        };
        Some(name)
    }
}

/// First half runs `start` compressed to 0..0.5, second half runs `end`.
fn combine(t: f32, start: Easing, end: Easing) -> f32 {
    if t < 0.5 {
        0.5 * start.apply(t * 2.0)
    } else {
        0.5 * end.apply((t - 0.5) * 2.0) + 0.5
    }
}

fn bounce_out(t: f32) -> f32 {
    const S: f32 = 7.5625;
    const P: f32 = 2.75;

    if t < 1.0 / P {
        S * t * t
    } else if t < 2.0 / P {
        let t = t - 1.5 / P;
        S * t * t + 0.75
    } else if t < 2.5 / P {
        let t = t - 2.25 / P;
        S * t * t + 0.9375
    } else {
        let t = t - 2.625 / P;
        S * t * t + 0.984375
    }
}

// ============================================================================
// Cubic Bezier
// ============================================================================

/// Cubic bezier easing calculation (matches CSS `cubic-bezier()`).
///
/// Newton-Raphson on the x curve, with bisection when the slope flattens.
/// Works in f64 to keep small frame steps from jittering.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³, in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

// ============================================================================
// Names, Comparison, Serde
// ============================================================================

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::CubicBezier(a, b, c, d), Easing::CubicBezier(e, f, g, h)) => {
                (a, b, c, d) == (e, f, g, h)
            }
            (Easing::Custom(a), Easing::Custom(b)) => *a as usize == *b as usize,
            _ => match (self.name(), other.name()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            Easing::Custom(_) => f.write_str("custom"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

impl FromStr for Easing {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(args) = trimmed
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_bezier(args).ok_or_else(|| TweenError::UnknownEasing(s.to_string()));
        }

        Easing::ALL
            .iter()
            .find(|easing| easing.name() == Some(trimmed))
            .copied()
            .ok_or_else(|| TweenError::UnknownEasing(s.to_string()))
    }
}

fn parse_bezier(args: &str) -> Option<Easing> {
    let values: Vec<f32> = args
        .split(',')
        .map(|v| v.trim().parse::<f32>().ok())
        .collect::<Option<_>>()?;
    match values[..] {
        [x1, y1, x2, y2] => Some(Easing::CubicBezier(x1, y1, x2, y2)),
        _ => None,
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Easing::Custom(_) = self {
            return Err(serde::ser::Error::custom(
                "custom easing functions cannot be serialized",
            ));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}
