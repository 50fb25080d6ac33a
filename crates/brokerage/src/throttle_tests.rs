// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use brokerage_core::FakeClock;

fn throttle(clock: FakeClock) -> Availability<FakeClock> {
    Availability::new(clock, Duration::from_millis(10_000))
}

#[test]
fn initial_state_is_unavailable() {
    let t = throttle(FakeClock::new());
    assert!(!t.is_available());
}

#[test]
fn due_is_true_immediately_after_construction_window_elapses() {
    let clock = FakeClock::new();
    let t = throttle(clock.clone());
    assert!(!t.due());
    clock.advance(Duration::from_millis(10_000));
    assert!(t.due());
}

#[test]
fn restart_resets_the_window() {
    let clock = FakeClock::new();
    let t = throttle(clock.clone());
    clock.advance(Duration::from_millis(9_999));
    assert!(!t.due());
    t.restart();
    clock.advance(Duration::from_millis(9_999));
    assert!(!t.due());
    clock.advance(Duration::from_millis(1));
    assert!(t.due());
}

#[test]
fn set_state_is_observable_regardless_of_whether_an_announce_happened() {
    let t = throttle(FakeClock::new());
    t.set_state(true);
    assert!(t.is_available());
    t.set_state(false);
    assert!(!t.is_available());
}

#[test]
fn throttle_bound_invariant_holds_across_repeated_restarts() {
    // Between any two successful re-announcements, elapsed monotonic time
    // is >= 10,000 ms.
    let clock = FakeClock::new();
    let t = throttle(clock.clone());
    let mut restarts = 0;
    for _ in 0..5 {
        clock.advance(Duration::from_millis(10_000));
        assert!(t.due());
        t.restart();
        restarts += 1;
    }
    assert_eq!(restarts, 5);
}
