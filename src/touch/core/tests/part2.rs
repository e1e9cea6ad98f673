use super::*;

#[test]
fn lifting_one_of_two_fingers_never_swipes() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100), s(2, 200, 100)], &[s(1, 100, 100), s(2, 200, 100)]);
    rig.up(60, &[s(2, 200, 100)], &[s(1, 100, 100)]);
    assert_eq!(rig.core.phase(), GesturePhase::Trailing);

    rig.moved(90, &[s(2, 320, 100)]);
    rig.up(120, &[], &[s(2, 320, 100)]);

    assert!(rig.gestures().is_empty());
    assert_eq!(rig.core.phase(), GesturePhase::Idle);
    assert!(rig.core.next_deadline_ms().is_none());
}

#[test]
fn third_finger_abandons_classification() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100), s(2, 200, 100)], &[s(1, 100, 100), s(2, 200, 100)]);
    rig.down(
        40,
        &[s(1, 100, 100), s(2, 200, 100), s(3, 150, 200)],
        &[s(3, 150, 200)],
    );
    assert_eq!(rig.core.phase(), GesturePhase::Trailing);
    assert!(rig.core.next_deadline_ms().is_none());

    rig.tick(1_000);
    rig.up(1_100, &[], &[s(1, 100, 100), s(2, 200, 100), s(3, 150, 200)]);

    assert!(rig.gestures().is_empty());
    assert_eq!(rig.core.phase(), GesturePhase::Idle);
}

#[test]
fn pinch_scale_stays_clamped() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 190, 100), s(2, 210, 100)], &[s(1, 190, 100), s(2, 210, 100)]);
    rig.moved(50, &[s(1, 0, 100), s(2, 400, 100)]);
    assert_eq!(rig.core.transform().scale, fx(4.0));

    rig.moved(100, &[s(1, 199, 100), s(2, 201, 100)]);
    assert_eq!(rig.core.transform().scale, fx(1.0));
    assert!(!rig.core.is_zoomed());
}

#[test]
fn coincident_pinch_contacts_are_finite() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100), s(2, 100, 100)], &[s(1, 100, 100), s(2, 100, 100)]);
    rig.moved(50, &[s(1, 60, 100), s(2, 140, 100)]);

    assert_eq!(rig.core.transform().scale, fx(4.0));
}

#[test]
fn zoomed_drag_pans_instead_of_swiping() {
    let mut rig = Rig::new();
    rig.tap(0, 40, 0, 0);
    rig.tap(100, 140, 0, 0);
    assert!(rig.core.is_zoomed());
    let zoomed = rig.core.transform();
    rig.actions.clear();

    rig.down(1_000, &[s(1, 100, 100)], &[s(1, 100, 100)]);
    rig.moved(1_040, &[s(1, 160, 90)]);
    rig.moved(1_080, &[s(1, 190, 80)]);
    rig.up(1_100, &[], &[s(1, 190, 80)]);

    let state = rig.core.transform();
    assert_eq!(state.scale, zoomed.scale);
    assert_eq!(state.translate_x, zoomed.translate_x + fx(90.0));
    assert_eq!(state.translate_y, zoomed.translate_y - fx(20.0));
    assert!(rig.gestures().is_empty());
    assert_eq!(rig.actions.len(), 2);
}

#[test]
fn swipe_is_suppressed_after_a_pinch_session() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100), s(2, 200, 100)], &[s(1, 100, 100), s(2, 200, 100)]);
    rig.moved(30, &[s(1, 100, 100), s(2, 260, 100)]);
    rig.up(60, &[s(1, 100, 100)], &[s(2, 260, 100)]);
    rig.moved(80, &[s(1, 200, 100)]);
    rig.up(100, &[], &[s(1, 200, 100)]);

    assert!(!rig
        .gestures()
        .iter()
        .any(|action| matches!(action, GestureAction::Swipe(_))));
}

#[test]
fn cancel_discards_pending_gesture() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100)], &[s(1, 100, 100)]);
    rig.tracker.clear();
    rig.run(GestureHsmEvent::Cancel { now_ms: 200 });
    rig.tick(700);

    assert!(rig.gestures().is_empty());
    assert_eq!(rig.core.phase(), GesturePhase::Idle);
    assert!(rig.core.next_deadline_ms().is_none());
}

#[test]
fn cancel_forgets_previous_tap() {
    let mut rig = Rig::new();

    rig.tap(0, 40, 100, 100);
    rig.run(GestureHsmEvent::Cancel { now_ms: 60 });
    rig.tap(120, 160, 100, 100);

    assert!(rig.gestures().is_empty());
}

#[test]
fn stale_timer_token_is_ignored() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100)], &[s(1, 100, 100)]);
    let stale = rig.core.pending_timers()[0].expect("long press armed");
    rig.up(100, &[], &[s(1, 100, 100)]);

    let output = rig.run(GestureHsmEvent::TimerFired {
        now_ms: 500,
        token: stale,
    });

    assert!(output.actions.is_empty());
    assert_eq!(output.stale_timers, 1);
    assert_eq!(output.timers_fired, 0);
}

#[test]
fn live_timer_token_fires_and_then_goes_stale() {
    let mut rig = Rig::new();

    rig.down(0, &[s(1, 100, 100), s(2, 200, 100)], &[s(1, 100, 100), s(2, 200, 100)]);
    let token = rig.core.pending_timers()[1].expect("two-finger armed");

    let first = rig.run(GestureHsmEvent::TimerFired { now_ms: 500, token });
    let second = rig.run(GestureHsmEvent::TimerFired { now_ms: 501, token });

    assert_eq!(first.actions.as_slice(), &[GestureAction::TwoFingerLongPress]);
    assert_eq!(first.timers_fired, 1);
    assert!(second.actions.is_empty());
    assert_eq!(second.stale_timers, 1);
}

#[test]
fn reset_transform_emits_identity_once() {
    let mut rig = Rig::new();
    rig.tap(0, 40, 10, 10);
    rig.tap(100, 140, 10, 10);
    rig.actions.clear();

    rig.run(GestureHsmEvent::ResetTransform);
    rig.run(GestureHsmEvent::ResetTransform);

    assert_eq!(
        rig.actions,
        std::vec![GestureAction::VisualTransform(TransformState::IDENTITY)]
    );
}

#[test]
fn teardown_clears_timers_but_keeps_transform() {
    let mut rig = Rig::new();
    rig.tap(0, 40, 10, 10);
    rig.tap(100, 140, 10, 10);
    rig.down(1_000, &[s(1, 10, 10)], &[s(1, 10, 10)]);
    let zoomed = rig.core.transform();

    rig.tracker.clear();
    rig.run(GestureHsmEvent::Teardown);

    assert!(rig.core.pending_timers().iter().all(Option::is_none));
    assert_eq!(rig.core.phase(), GesturePhase::Idle);
    assert_eq!(rig.core.transform(), zoomed);
}
