//! Animated properties
//!
//! A [`Property`] animates one bound value from a start to an end inside a
//! tween. The sequencer only sees properties through the type-erased
//! [`AnimatedProperty`] trait, so one tween can mix floats, booleans,
//! colors and custom types.

use std::fmt;
use std::time::Duration;

use tempo_core::{interpolate, Binding, Interpolate, Interpolator, Slot};

use crate::easing::Easing;

/// A callback fired by the sequencer
pub type Callback = Box<dyn FnMut()>;

/// Timing of one property inside its tween
///
/// `delay`, `duration` and `easing` are the per-property overrides. Unset
/// values fall back to the tween's defaults; `duration` and `easing` are
/// filled in on activation. `start_time` and `end_time` are absolute
/// sequencer-clock timestamps, written once on activation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropertyTiming {
    pub delay: Option<Duration>,
    pub duration: Option<Duration>,
    pub easing: Option<Easing>,
    pub start_time: Duration,
    pub end_time: Duration,
}

/// Type-erased interface the sequencer drives properties through
pub trait AnimatedProperty {
    fn timing(&self) -> &PropertyTiming;

    fn timing_mut(&mut self) -> &mut PropertyTiming;

    /// Called once when the owning tween activates, before timestamps are
    /// computed
    fn activate(&mut self);

    /// Write the value at eased progress `ratio`
    fn apply(&mut self, ratio: f32);

    /// Fire the per-update callback, if any
    fn fire_callback(&mut self);

    /// Human-readable name for logs
    fn name(&self) -> &str;
}

/// A bound value animated from `start` to `end`
pub struct Property<T> {
    binding: Binding<T>,
    start: T,
    end: T,
    capture_on_activate: bool,
    interpolator: Interpolator<T>,
    timing: PropertyTiming,
    callback: Option<Callback>,
    label: String,
}

impl<T: Interpolate + 'static> Property<T> {
    /// Animate `binding` towards `end`
    ///
    /// The start value is read from the binding right now.
    pub fn new(binding: Binding<T>, end: T) -> Self {
        Self::with_interpolator(binding, end, interpolate::<T>)
    }
}

impl<T: Clone + 'static> Property<T> {
    /// Animate `binding` towards `end` with a custom interpolation function
    pub fn with_interpolator(binding: Binding<T>, end: T, interpolator: Interpolator<T>) -> Self {
        let start = binding.get();
        Self {
            binding,
            start,
            end,
            capture_on_activate: false,
            interpolator,
            timing: PropertyTiming::default(),
            callback: None,
            label: std::any::type_name::<T>().to_string(),
        }
    }

    /// Use a fixed start value instead of the one read at construction
    pub fn starting_at(mut self, start: T) -> Self {
        self.start = start;
        self.capture_on_activate = false;
        self
    }

    /// Re-read the start value when the owning tween activates
    ///
    /// Needed when earlier steps of the same sequence move this value.
    pub fn capture_on_activate(mut self) -> Self {
        self.capture_on_activate = true;
        self
    }

    /// Delay before this property starts, relative to tween activation
    pub fn delay(mut self, delay: Duration) -> Self {
        self.timing.delay = Some(delay);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.timing.duration = Some(duration);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.timing.easing = Some(easing);
        self
    }

    /// Callback invoked after every update that writes this property,
    /// including repeated writes of the end value
    pub fn callback<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Name used in log output
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    /// Value at eased progress `ratio` without writing it
    pub fn value_at(&self, ratio: f32) -> T {
        (self.interpolator)(ratio, &self.start, &self.end)
    }
}

impl<T: Clone + 'static> AnimatedProperty for Property<T> {
    fn timing(&self) -> &PropertyTiming {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut PropertyTiming {
        &mut self.timing
    }

    fn activate(&mut self) {
        if self.capture_on_activate {
            self.start = self.binding.get();
        }
    }

    fn apply(&mut self, ratio: f32) {
        let value = self.value_at(ratio);
        self.binding.set(value);
    }

    fn fire_callback(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("label", &self.label)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Slot Shorthand
// ============================================================================

/// Shorthand for animating a [`Slot`]: `x.to(10.0)`
pub trait Tweenable<T> {
    fn to(&self, end: T) -> Property<T>;
}

impl<T: Interpolate + 'static> Tweenable<T> for Slot<T> {
    fn to(&self, end: T) -> Property<T> {
        Property::new(self.binding(), end)
    }
}
