//! End-to-end playback behavior of the tween sequencer

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempo_animation::{
    sequential_animation, AdvanceMode, Easing, Property, Tween, TweenAnimation, Tweenable,
};
use tempo_core::{Binding, Color, Slot};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let count_clone = count.clone();
    (count, move || count_clone.set(count_clone.get() + 1))
}

fn waits(durations: &[u64], mode: AdvanceMode) -> TweenAnimation {
    let mut anim = TweenAnimation::new().with_advance_mode(mode);
    for &d in durations {
        anim.wait(ms(d));
    }
    anim
}

#[test]
fn test_waits_complete_under_cascade_with_any_tick_split() {
    let durations = [120, 30, 250, 0, 75];
    let total: u64 = durations.iter().sum();

    for tick in [1, 7, 50, 333, total] {
        let mut anim = waits(&durations, AdvanceMode::Cascade);
        let mut fed = 0;
        while fed < total {
            anim.update(ms(tick));
            fed += tick;
        }
        assert_eq!(anim.cursor(), durations.len(), "tick of {tick}ms");

        let elapsed = anim.elapsed();
        anim.update(ms(100));
        assert_eq!(anim.cursor(), durations.len());
        assert_eq!(anim.elapsed(), elapsed);
    }
}

#[test]
fn test_waits_complete_under_single_step_with_aligned_ticks() {
    let durations = [100, 200, 50, 150];
    let mut anim = waits(&durations, AdvanceMode::SingleStep);

    for _ in 0..(500 / 50) {
        anim.update(ms(50));
    }
    assert!(anim.is_finished());
    assert_eq!(anim.cursor(), 4);
}

#[test]
fn test_single_update_advances_at_most_one_step() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut anim = TweenAnimation::new();
    for index in 0..3 {
        let log = log.clone();
        anim.wait(secs(1))
            .final_callback(move || log.borrow_mut().push(index));
    }

    anim.update(secs(10));
    assert_eq!(anim.cursor(), 1);
    assert_eq!(*log.borrow(), vec![0]);

    anim.update(secs(10));
    assert_eq!(anim.cursor(), 2);
    assert_eq!(*log.borrow(), vec![0, 1]);
}

#[test]
fn test_cascade_drains_every_due_step() {
    let (finished, on_finish) = counter();
    let mut anim = TweenAnimation::new().with_advance_mode(AdvanceMode::Cascade);
    anim.wait(secs(1)).final_callback(on_finish);
    anim.wait(secs(1));
    anim.wait(secs(1));

    anim.update(secs(10));
    assert!(anim.is_finished());
    assert_eq!(finished.get(), 1);
}

#[test]
fn test_linear_float_interpolation() {
    let x = Slot::new(0.0f32);
    let (updates, on_update) = counter();

    let mut anim = sequential_animation(|anim| {
        anim.tween(
            vec![x.to(10.0).callback(on_update).into()],
            Duration::ZERO,
            secs(2),
            Easing::Linear,
        );
    });

    anim.update(secs(1));
    assert_eq!(x.get(), 5.0);
    assert_eq!(updates.get(), 1);

    anim.update(secs(1));
    assert_eq!(x.get(), 10.0);
    assert_eq!(updates.get(), 2);
    assert!(anim.is_finished());
}

#[test]
fn test_boolean_switches_once_past_halfway() {
    let visible = Slot::new(false);
    let mut anim = TweenAnimation::new();
    anim.tween(
        vec![visible.to(true).into()],
        Duration::ZERO,
        secs(1),
        Easing::Linear,
    );

    anim.update(ms(490));
    assert!(!visible.get());

    anim.update(ms(20));
    assert!(visible.get());
}

#[test]
fn test_zero_duration_tween_completes_on_first_update() {
    let x = Slot::new(1.0f32);
    let (updates, on_update) = counter();
    let (finished, on_finish) = counter();

    let mut anim = TweenAnimation::new();
    anim.tween(
        vec![x.to(-3.0).callback(on_update).into()],
        Duration::ZERO,
        Duration::ZERO,
        Easing::EaseInOut,
    )
    .final_callback(on_finish);

    anim.update(ms(16));
    assert_eq!(x.get(), -3.0);
    assert_eq!(updates.get(), 1);
    assert_eq!(finished.get(), 1);
    assert_eq!(anim.cursor(), 1);
}

#[test]
fn test_finished_property_is_reapplied_while_tween_runs() {
    let fast = Slot::new(0.0f32);
    let slow = Slot::new(0.0f32);
    let (fast_updates, on_fast_update) = counter();

    let mut anim = TweenAnimation::new();
    anim.tween(
        vec![
            fast.to(1.0).duration(ms(100)).callback(on_fast_update).into(),
            slow.to(1.0).into(),
        ],
        Duration::ZERO,
        secs(1),
        Easing::Linear,
    );

    for _ in 0..5 {
        anim.update(ms(100));
        assert_eq!(fast.get(), 1.0);
    }
    assert_eq!(fast_updates.get(), 5);
    assert_eq!(anim.cursor(), 0);

    // Overwrite between ticks; the next tick writes the end value again
    fast.set(0.25);
    anim.update(ms(100));
    assert_eq!(fast.get(), 1.0);
    assert_eq!(fast_updates.get(), 6);
}

#[test]
fn test_properties_keep_independent_timing() {
    let a = Slot::new(0.0f32);
    let b = Slot::new(0.0f32);

    let mut anim = TweenAnimation::new();
    anim.tween(
        vec![a.to(2.0).into(), b.to(4.0).delay(ms(500)).into()],
        Duration::ZERO,
        secs(1),
        Easing::Linear,
    );

    anim.update(ms(500));
    assert_eq!(a.get(), 1.0);
    assert_eq!(b.get(), 0.0);
    assert_eq!(anim.current().map(Tween::end_time), Some(ms(1500)));

    anim.update(ms(500));
    assert_eq!(a.get(), 2.0);
    assert_eq!(b.get(), 2.0);
    assert_eq!(anim.cursor(), 0);

    anim.update(ms(500));
    assert_eq!(b.get(), 4.0);
    assert_eq!(anim.cursor(), 1);
}

#[test]
fn test_start_capture_modes_across_steps() {
    let x = Slot::new(0.0f32);

    let mut anim = sequential_animation(|anim| {
        anim.tween(vec![x.to(10.0).into()], Duration::ZERO, secs(1), Easing::Linear);
        // Built while x is still 0.0
        anim.tween(vec![x.to(20.0).into()], Duration::ZERO, secs(1), Easing::Linear);
    });

    anim.update(secs(1));
    assert_eq!(x.get(), 10.0);
    anim.update(ms(500));
    // Interpolates 0.0 -> 20.0, the value read at construction
    assert_eq!(x.get(), 10.0);

    let y = Slot::new(0.0f32);
    let mut anim = sequential_animation(|anim| {
        anim.tween(vec![y.to(10.0).into()], Duration::ZERO, secs(1), Easing::Linear);
        anim.tween(
            vec![y.to(20.0).capture_on_activate().into()],
            Duration::ZERO,
            secs(1),
            Easing::Linear,
        );
    });

    anim.update(secs(1));
    anim.update(ms(500));
    assert_eq!(y.get(), 15.0);
}

#[test]
fn test_field_binding_and_color_property() {
    #[derive(Default)]
    struct Sprite {
        tint: Color,
        frame: i32,
    }

    let sprite = Rc::new(RefCell::new(Sprite::default()));
    let tint = Binding::field(&sprite, |s| s.tint, |s, c| s.tint = c);
    let frame = Binding::field(&sprite, |s| s.frame, |s, f| s.frame = f);

    let mut anim = TweenAnimation::new();
    anim.tween(
        vec![
            Property::new(tint, Color::WHITE).into(),
            Property::new(frame, 8).into(),
        ],
        Duration::ZERO,
        secs(2),
        Easing::Linear,
    );

    anim.update(ms(500));
    assert_eq!(sprite.borrow().frame, 2);
    assert_eq!(sprite.borrow().tint, Color::rgba(0.25, 0.25, 0.25, 1.0));

    anim.update(ms(1500));
    assert_eq!(sprite.borrow().frame, 8);
    assert_eq!(sprite.borrow().tint, Color::WHITE);
}

#[test]
fn test_execute_and_wait_interleave() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let push = |name: &'static str| {
        let log = log.clone();
        move || log.borrow_mut().push(name)
    };

    let mut anim = TweenAnimation::new().with_advance_mode(AdvanceMode::Cascade);
    anim.execute(Duration::ZERO, Duration::ZERO, push("fire"));
    anim.wait(ms(250)).initial_callback(push("wait"));
    anim.execute(ms(100), Duration::ZERO, push("again"))
        .final_callback(push("done"));

    anim.update(ms(100));
    assert_eq!(*log.borrow(), vec!["fire", "wait"]);

    anim.update(ms(200));
    assert_eq!(*log.borrow(), vec!["fire", "wait", "again"]);

    anim.update(ms(100));
    assert_eq!(*log.borrow(), vec!["fire", "wait", "again", "done"]);
    assert!(anim.is_finished());
}
