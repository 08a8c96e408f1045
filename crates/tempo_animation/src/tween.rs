//! A single step of a tween sequence

use std::fmt;
use std::time::Duration;

use smallvec::SmallVec;
use tracing::trace;

use crate::easing::Easing;
use crate::property::{AnimatedProperty, Callback, Property};

/// One step of a [`TweenAnimation`](crate::TweenAnimation)
///
/// A tween bundles zero or more properties that animate concurrently, plus
/// defaults for the properties that leave delay, duration or easing unset.
/// A tween without properties is a pure wait or callback step: it lasts
/// `default_delay + default_duration`.
///
/// Decorators take `&mut self` so they can be chained on the reference
/// returned by the sequencer; the `with_*` variants take `self` for
/// building a tween before pushing it.
pub struct Tween {
    properties: SmallVec<[Box<dyn AnimatedProperty>; 2]>,
    default_delay: Duration,
    default_duration: Duration,
    default_easing: Easing,
    initial_callback: Option<Callback>,
    final_callback: Option<Callback>,
    active: bool,
    end_time: Duration,
}

impl Tween {
    /// Create an empty, zero-length tween
    pub fn new() -> Self {
        Self {
            properties: SmallVec::new(),
            default_delay: Duration::ZERO,
            default_duration: Duration::ZERO,
            default_easing: Easing::Linear,
            initial_callback: None,
            final_callback: None,
            active: false,
            end_time: Duration::ZERO,
        }
    }

    // ========================================================================
    // Decorators
    // ========================================================================

    /// Add a property to animate
    pub fn add_property<T: Clone + 'static>(&mut self, property: Property<T>) -> &mut Self {
        self.assert_inactive();
        self.properties.push(Box::new(property));
        self
    }

    /// Add an already type-erased property
    pub fn add_boxed(&mut self, property: Box<dyn AnimatedProperty>) -> &mut Self {
        self.assert_inactive();
        self.properties.push(property);
        self
    }

    /// Callback fired once when the tween activates, before any delay elapses
    pub fn initial_callback<F: FnMut() + 'static>(&mut self, callback: F) -> &mut Self {
        self.assert_inactive();
        self.initial_callback = Some(Box::new(callback));
        self
    }

    /// Callback fired once when the tween completes
    pub fn final_callback<F: FnMut() + 'static>(&mut self, callback: F) -> &mut Self {
        self.assert_inactive();
        self.final_callback = Some(Box::new(callback));
        self
    }

    pub fn default_delay(&mut self, delay: Duration) -> &mut Self {
        self.assert_inactive();
        self.default_delay = delay;
        self
    }

    pub fn default_duration(&mut self, duration: Duration) -> &mut Self {
        self.assert_inactive();
        self.default_duration = duration;
        self
    }

    pub fn default_easing(&mut self, easing: Easing) -> &mut Self {
        self.assert_inactive();
        self.default_easing = easing;
        self
    }

    /// Builder: add a property
    pub fn with_property<T: Clone + 'static>(mut self, property: Property<T>) -> Self {
        self.add_property(property);
        self
    }

    /// Builder: set the initial callback
    pub fn with_initial_callback<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.initial_callback(callback);
        self
    }

    /// Builder: set the final callback
    pub fn with_final_callback<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.final_callback(callback);
        self
    }

    /// Builder: set default delay, duration and easing at once
    pub fn with_defaults(mut self, delay: Duration, duration: Duration, easing: Easing) -> Self {
        self.default_delay(delay)
            .default_duration(duration)
            .default_easing(easing);
        self
    }

    // Decorators are build-phase only; timestamps are fixed on activation.
    fn assert_inactive(&self) {
        debug_assert!(!self.active, "tween modified after activation");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Absolute completion time; meaningful once active
    pub fn end_time(&self) -> Duration {
        self.end_time
    }

    pub fn delay(&self) -> Duration {
        self.default_delay
    }

    pub fn duration(&self) -> Duration {
        self.default_duration
    }

    pub fn easing(&self) -> Easing {
        self.default_easing
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Iterate over the properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = &dyn AnimatedProperty> + '_ {
        self.properties.iter().map(|p| p.as_ref())
    }

    // ========================================================================
    // Sequencer Hooks
    // ========================================================================

    /// Activate the tween at clock time `now`
    pub(crate) fn activate(&mut self, now: Duration) {
        self.active = true;
        if let Some(callback) = self.initial_callback.as_mut() {
            callback();
        }

        // Timestamps saturate at Duration::MAX; such a tween never completes
        self.end_time = now
            .saturating_add(self.default_delay)
            .saturating_add(self.default_duration);

        for property in self.properties.iter_mut() {
            property.activate();

            let timing = property.timing_mut();
            timing.start_time = now.saturating_add(timing.delay.unwrap_or(self.default_delay));
            let duration = timing.duration.unwrap_or(self.default_duration);
            timing.end_time = timing.start_time.saturating_add(duration);
            timing.duration = Some(duration);
            if timing.easing.is_none() {
                timing.easing = Some(self.default_easing);
            }

            self.end_time = self.end_time.max(timing.end_time);
        }
    }

    /// Write every due property for clock time `now`
    pub(crate) fn apply(&mut self, now: Duration) {
        for property in self.properties.iter_mut() {
            let timing = *property.timing();

            // Also covers zero duration, where end_time == start_time
            if timing.end_time <= now {
                property.apply(1.0);
                property.fire_callback();
            } else if timing.start_time <= now {
                let duration = timing.end_time - timing.start_time;
                let progress = (now - timing.start_time).as_secs_f32() / duration.as_secs_f32();
                let eased = timing.easing.unwrap_or(self.default_easing).apply(progress);
                trace!("{}: progress {:.3} -> {:.3}", property.name(), progress, eased);
                property.apply(eased);
                property.fire_callback();
            }
        }
    }

    /// Fire the final callback
    pub(crate) fn finish(&mut self) {
        if let Some(callback) = self.final_callback.as_mut() {
            callback();
        }
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field(
                "properties",
                &self.properties().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("default_delay", &self.default_delay)
            .field("default_duration", &self.default_duration)
            .field("default_easing", &self.default_easing)
            .field("active", &self.active)
            .field("end_time", &self.end_time)
            .finish()
    }
}
