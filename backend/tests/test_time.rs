//! Tests for TimeManager

use production_line_sim_core::core::time::{SECONDS_PER_HOUR, STEP_SECONDS};
use production_line_sim_core::TimeManager;

#[test]
fn test_time_manager_new() {
    let time = TimeManager::new(100.0);
    assert_eq!(time.current_step(), 0);
    assert_eq!(time.current_time(), 0.0);
    assert!(!time.is_finished());
}

#[test]
fn test_advance_step() {
    let mut time = TimeManager::new(100.0);

    time.advance_step();
    assert_eq!(time.current_step(), 1);
    assert_eq!(time.current_time(), STEP_SECONDS);

    time.advance_step();
    assert_eq!(time.current_step(), 2);
    assert_eq!(time.current_time(), 2.0 * STEP_SECONDS);
}

#[test]
fn test_duration_is_inclusive() {
    let mut time = TimeManager::new(3.0);

    let mut steps = 0;
    while !time.is_finished() {
        steps += 1;
        time.advance_step();
    }

    // t = 0, 1, 2, 3
    assert_eq!(steps, 4);
    assert_eq!(time.num_steps(), 4);
}

#[test]
fn test_one_second_run_has_two_steps() {
    assert_eq!(TimeManager::new(1.0).num_steps(), 2);
}

#[test]
fn test_eight_hour_run_step_count() {
    let time = TimeManager::new(8.0 * SECONDS_PER_HOUR);
    assert_eq!(time.num_steps(), 28_801);
    assert_eq!(time.duration_hours(), 8.0);
}

#[test]
fn test_fractional_duration_rounds_down() {
    // Steps at 0, 1, 2; t = 3 is past 2.5
    assert_eq!(TimeManager::new(2.5).num_steps(), 3);
}

#[test]
fn test_zero_and_negative_durations() {
    let zero = TimeManager::new(0.0);
    assert_eq!(zero.num_steps(), 1);
    assert!(!zero.is_finished());

    let negative = TimeManager::new(-5.0);
    assert_eq!(negative.num_steps(), 0);
    assert!(negative.is_finished());
}

#[test]
fn test_nan_duration_is_finished() {
    let time = TimeManager::new(f64::NAN);
    assert!(time.is_finished());
    assert_eq!(time.num_steps(), 0);
}

#[test]
fn test_reset_returns_to_start() {
    let mut time = TimeManager::new(10.0);
    for _ in 0..7 {
        time.advance_step();
    }
    assert_eq!(time.current_step(), 7);

    time.reset();
    assert_eq!(time.current_step(), 0);
    assert_eq!(time.duration(), 10.0);
}
