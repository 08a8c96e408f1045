//! Tween sequencer
//!
//! [`TweenAnimation`] plays an ordered list of [`Tween`] steps. Steps run
//! strictly one after another; the properties inside a step run
//! concurrently. The sequencer keeps its own clock, advanced only by
//! [`update`](TweenAnimation::update), so playback depends on nothing but
//! the sequence of `dt` values it is fed.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tempo_animation::{sequential_animation, Easing, Tweenable};
//! use tempo_core::Slot;
//!
//! let x = Slot::new(0.0f32);
//!
//! let mut anim = sequential_animation(|anim| {
//!     anim.wait(Duration::from_millis(500));
//!     anim.tween(
//!         vec![x.to(10.0).into()],
//!         Duration::ZERO,
//!         Duration::from_secs(1),
//!         Easing::Linear,
//!     );
//! });
//!
//! anim.update(Duration::from_millis(500)); // wait completes
//! anim.update(Duration::from_millis(500)); // halfway through the tween
//! assert_eq!(x.get(), 5.0);
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tempo_core::{Result, TweenError};
use tracing::debug;

use crate::easing::Easing;
use crate::property::{AnimatedProperty, Property};
use crate::tween::Tween;

/// Index of a tween inside its sequencer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(usize);

impl TweenId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// How far a single `update` call may move the cursor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvanceMode {
    /// Complete at most one tween per `update`. Time left over when a tween
    /// ends mid-tick is not carried into the next tween.
    #[default]
    SingleStep,
    /// Keep completing tweens inside one `update` until the current one is
    /// not yet due. Each follow-up tween is activated at its predecessor's
    /// end time, so no time is lost to large ticks.
    Cascade,
}

/// A type-erased property ready to be placed in a tween
pub struct BoxedProperty(Box<dyn AnimatedProperty>);

impl<T: Clone + 'static> From<Property<T>> for BoxedProperty {
    fn from(property: Property<T>) -> Self {
        BoxedProperty(Box::new(property))
    }
}

/// Sequential tween player
pub struct TweenAnimation {
    tweens: Vec<Tween>,
    cursor: usize,
    time_progress: Duration,
    advance_mode: AdvanceMode,
}

/// Create a [`TweenAnimation`] and run `build` against it
pub fn sequential_animation<F: FnOnce(&mut TweenAnimation)>(build: F) -> TweenAnimation {
    let mut animation = TweenAnimation::new();
    build(&mut animation);
    animation
}

impl TweenAnimation {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            cursor: 0,
            time_progress: Duration::ZERO,
            advance_mode: AdvanceMode::SingleStep,
        }
    }

    /// Builder: set the advance mode
    pub fn with_advance_mode(mut self, mode: AdvanceMode) -> Self {
        self.advance_mode = mode;
        self
    }

    pub fn set_advance_mode(&mut self, mode: AdvanceMode) {
        self.advance_mode = mode;
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance_mode
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Append a step that only consumes `duration`
    pub fn wait(&mut self, duration: Duration) -> &mut Tween {
        let mut tween = Tween::new();
        tween.default_duration(duration);
        self.push(tween)
    }

    /// Append a step animating `properties` concurrently
    ///
    /// The defaults apply to every property that leaves its own delay,
    /// duration or easing unset. An empty property list gives a step lasting
    /// `default_delay + default_duration`.
    pub fn tween(
        &mut self,
        properties: Vec<BoxedProperty>,
        default_delay: Duration,
        default_duration: Duration,
        default_easing: Easing,
    ) -> &mut Tween {
        let mut tween = Tween::new().with_defaults(default_delay, default_duration, default_easing);
        for BoxedProperty(property) in properties {
            tween.add_boxed(property);
        }
        self.push(tween)
    }

    /// Append a step that fires `callback` on activation, then lasts
    /// `delay + duration`
    pub fn execute<F: FnMut() + 'static>(
        &mut self,
        delay: Duration,
        duration: Duration,
        callback: F,
    ) -> &mut Tween {
        let tween = Tween::new()
            .with_defaults(delay, duration, Easing::Linear)
            .with_initial_callback(callback);
        self.push(tween)
    }

    /// Append a pre-built tween
    pub fn push(&mut self, tween: Tween) -> &mut Tween {
        self.tweens.push(tween);
        let last = self.tweens.len() - 1;
        &mut self.tweens[last]
    }

    /// Run another build closure against this animation
    pub fn append<F: FnOnce(&mut TweenAnimation)>(&mut self, build: F) -> &mut Self {
        build(self);
        self
    }

    /// Remove all tweens and rewind cursor and clock
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.cursor = 0;
        self.time_progress = Duration::ZERO;
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Advance the animation by `dt`
    ///
    /// A tween that becomes current is activated at the clock value from
    /// before this tick; its properties are then evaluated at the clock
    /// value after adding `dt`. Once the cursor passes the last tween this
    /// is a no-op.
    pub fn update(&mut self, dt: Duration) {
        if self.is_finished() {
            return;
        }

        let mut activate_at = self.time_progress;
        self.time_progress = self.time_progress.saturating_add(dt);
        let now = self.time_progress;

        while let Some(tween) = self.tweens.get_mut(self.cursor) {
            if !tween.is_active() {
                debug!(
                    "Activating tween {} at {:?} ({} properties)",
                    self.cursor,
                    activate_at,
                    tween.property_count()
                );
                tween.activate(activate_at);
            }

            tween.apply(now);

            if tween.end_time() > now {
                break;
            }

            tween.finish();
            activate_at = tween.end_time();
            debug!("Tween {} finished at {:?}", self.cursor, activate_at);
            self.cursor += 1;

            if self.advance_mode == AdvanceMode::SingleStep {
                break;
            }
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Index of the current tween; equals `len()` once finished
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total time fed through `update`
    pub fn elapsed(&self) -> Duration {
        self.time_progress
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.tweens.len()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Id of the most recently appended tween
    pub fn last_id(&self) -> Option<TweenId> {
        self.tweens.len().checked_sub(1).map(TweenId)
    }

    /// The tween at the cursor, if any
    pub fn current(&self) -> Option<&Tween> {
        self.tweens.get(self.cursor)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id.0)
    }

    /// Mutable access to a tween that has not been activated yet
    pub fn step_mut(&mut self, id: TweenId) -> Result<&mut Tween> {
        let tween = self
            .tweens
            .get_mut(id.0)
            .ok_or(TweenError::UnknownStep(id.0))?;
        if tween.is_active() {
            return Err(TweenError::AlreadyActive(id.0));
        }
        Ok(tween)
    }

    /// Iterate over all tweens in execution order
    pub fn iter(&self) -> impl Iterator<Item = &Tween> + '_ {
        self.tweens.iter()
    }
}

impl Default for TweenAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TweenAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenAnimation")
            .field("cursor", &self.cursor)
            .field("time_progress", &self.time_progress)
            .field("advance_mode", &self.advance_mode)
            .field("tweens", &self.tweens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Tweenable;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tempo_core::Slot;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, move || count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn test_empty_animation_is_finished() {
        let mut anim = TweenAnimation::new();
        assert!(anim.is_finished());
        anim.update(ms(100));
        assert_eq!(anim.cursor(), 0);
        assert_eq!(anim.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_wait_consumes_time() {
        let mut anim = TweenAnimation::new();
        anim.wait(ms(300));

        anim.update(ms(100));
        anim.update(ms(100));
        assert_eq!(anim.cursor(), 0);

        anim.update(ms(100));
        assert_eq!(anim.cursor(), 1);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_execute_fires_on_activation() {
        let (fired, callback) = counter();
        let mut anim = TweenAnimation::new();
        anim.execute(ms(500), Duration::ZERO, callback);

        anim.update(ms(10));
        assert_eq!(fired.get(), 1);
        assert_eq!(anim.cursor(), 0);

        anim.update(ms(490));
        assert_eq!(fired.get(), 1);
        assert_eq!(anim.cursor(), 1);
    }

    #[test]
    fn test_steps_run_in_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut anim = TweenAnimation::new();
        for name in ["a", "b", "c"] {
            let log = log.clone();
            anim.wait(ms(10))
                .final_callback(move || log.borrow_mut().push(name));
        }

        for _ in 0..3 {
            anim.update(ms(10));
        }
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_decorating_returned_tween() {
        let x = Slot::new(0.0f32);
        let (started, on_start) = counter();
        let (finished, on_finish) = counter();

        let mut anim = TweenAnimation::new();
        anim.tween(vec![x.to(1.0).into()], Duration::ZERO, ms(100), Easing::Linear)
            .initial_callback(on_start)
            .final_callback(on_finish);

        anim.update(ms(100));
        assert_eq!(x.get(), 1.0);
        assert_eq!(started.get(), 1);
        assert_eq!(finished.get(), 1);
    }

    #[test]
    fn test_step_mut_before_and_after_activation() {
        let mut anim = TweenAnimation::new();
        anim.wait(ms(100));
        let id = anim.last_id().unwrap();

        anim.step_mut(id).unwrap().default_duration(ms(200));
        assert_eq!(anim.get(id).unwrap().duration(), ms(200));

        anim.update(ms(50));
        assert_eq!(
            anim.step_mut(id).unwrap_err(),
            TweenError::AlreadyActive(0)
        );
        assert_eq!(
            anim.step_mut(TweenId(7)).unwrap_err(),
            TweenError::UnknownStep(7)
        );
    }

    #[test]
    fn test_cascade_carries_leftover_time() {
        let x = Slot::new(0.0f32);
        let mut anim = TweenAnimation::new().with_advance_mode(AdvanceMode::Cascade);
        anim.wait(ms(1000));
        anim.tween(vec![x.to(10.0).into()], Duration::ZERO, ms(2000), Easing::Linear);

        anim.update(ms(2000));
        assert_eq!(anim.cursor(), 1);
        assert_eq!(x.get(), 5.0);
    }

    #[test]
    fn test_single_step_drops_leftover_time() {
        let x = Slot::new(0.0f32);
        let mut anim = TweenAnimation::new();
        anim.wait(ms(1000));
        anim.tween(vec![x.to(10.0).into()], Duration::ZERO, ms(2000), Easing::Linear);

        anim.update(ms(2000));
        assert_eq!(anim.cursor(), 1);
        assert_eq!(x.get(), 0.0);

        anim.update(ms(1000));
        assert_eq!(x.get(), 5.0);
    }

    #[test]
    fn test_unbounded_timing_keeps_updating() {
        let huge = Duration::from_secs(u64::MAX / 2 + 1);
        let mut anim = TweenAnimation::new();
        anim.tween(Vec::new(), huge, huge, Easing::Linear);

        anim.update(ms(16));
        assert_eq!(anim.cursor(), 0);
        assert_eq!(anim.current().map(Tween::end_time), Some(Duration::MAX));

        anim.update(Duration::MAX);
        assert_eq!(anim.elapsed(), Duration::MAX);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_clear_rewinds() {
        let mut anim = TweenAnimation::new();
        anim.wait(ms(10));
        anim.update(ms(10));
        assert!(anim.is_finished());

        anim.clear();
        assert!(anim.is_empty());
        assert_eq!(anim.elapsed(), Duration::ZERO);

        anim.wait(ms(10));
        assert!(!anim.is_finished());
        anim.update(ms(10));
        assert!(anim.is_finished());
    }

    #[test]
    fn test_append_and_push() {
        let mut anim = sequential_animation(|anim| {
            anim.wait(ms(10));
        });
        anim.append(|anim| {
            anim.push(Tween::new().with_defaults(ms(5), ms(5), Easing::Smooth));
        });

        assert_eq!(anim.len(), 2);
        assert_eq!(anim.iter().nth(1).unwrap().easing(), Easing::Smooth);
    }
}
