// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the blink cycle state machine.

use blinker_common::button::ActiveLowButton;
use blinker_common::cycle::{
    transition, CycleState, CycleStateMachine, LedAction, Phase, Transition, CYCLE_PERIOD_MS,
    ON_PHASE_MS,
};
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};

const ON: usize = ON_PHASE_MS as usize;
const PERIOD: usize = CYCLE_PERIOD_MS as usize;

/// Runs the machine over `pressed` and returns the LED level after each tick.
fn led_levels(pressed: impl IntoIterator<Item = bool>) -> Vec<bool> {
    let mut machine = CycleStateMachine::new();
    pressed
        .into_iter()
        .map(|p| {
            machine.step(p);
            machine.led_on()
        })
        .collect()
}

fn expected_schedule(ticks: usize) -> impl Iterator<Item = bool> {
    (0..ticks).map(|t| t % PERIOD < ON)
}

#[test]
fn test_initial_state() {
    let machine = CycleStateMachine::new();

    assert_eq!(machine.state(), CycleState::new());
    assert!(!machine.state().button_latched());
    assert_eq!(machine.state().elapsed_ms(), 0);
    assert_eq!(machine.state().phase(), Phase::Idle);
    assert!(!machine.led_on());
}

#[test]
fn test_led_stays_off_without_press() {
    let levels = led_levels(std::iter::repeat(false).take(5000));

    assert_eq!(levels.len(), 5000);
    assert!(levels.iter().all(|on| !on));
}

#[test]
fn test_idle_forces_led_off() {
    let (next, t) = transition(CycleState::new(), false);

    assert_eq!(next, CycleState::new());
    assert_eq!(t.phase, Phase::Idle);
    assert_eq!(t.action, LedAction::Off);
    assert!(!t.latched);
}

#[test]
fn test_press_at_tick_zero_follows_schedule() {
    let ticks = 4 * PERIOD;
    let levels = led_levels(std::iter::once(true).chain(std::iter::repeat(false)).take(ticks));

    assert!(levels.iter().copied().eq(expected_schedule(ticks)));
}

#[test]
fn test_press_held_from_tick_500() {
    let ticks = 500 + 2 * PERIOD;
    let pressed = (0..ticks).map(|t| t >= 500);
    let levels = led_levels(pressed);

    assert!(levels[..500].iter().all(|on| !on));
    assert!(levels[500..].iter().copied().eq(expected_schedule(ticks - 500)));
}

#[test]
fn test_phase_lengths() {
    let levels = led_levels(std::iter::once(true).chain(std::iter::repeat(false)).take(PERIOD));

    assert_eq!(levels.iter().filter(|on| **on).count(), 1000);
    assert_eq!(levels.iter().filter(|on| !**on).count(), 2000);
    assert!(levels[ON - 1]);
    assert!(!levels[ON]);
    assert!(!levels[PERIOD - 1]);
}

#[test]
fn test_button_ignored_after_latch() {
    let ticks = 3 * PERIOD;
    // Bouncy press, release, then pressed again mid-cycle.
    let pressed = (0..ticks).map(|t| t < 7 && t % 2 == 0 || (1500..1600).contains(&t));
    let levels = led_levels(pressed);

    assert!(levels.iter().copied().eq(expected_schedule(ticks)));
}

#[test]
fn test_elapsed_stays_below_period() {
    let mut machine = CycleStateMachine::new();
    machine.step(true);

    for _ in 0..(3 * PERIOD) {
        machine.step(false);
        assert!(machine.state().elapsed_ms() < CYCLE_PERIOD_MS);
    }
}

#[test]
fn test_latch_tick_transition() {
    let mut machine = CycleStateMachine::new();
    let t = machine.step(true);

    assert_eq!(
        t,
        Transition {
            phase: Phase::OnStart,
            action: LedAction::On,
            latched: true,
            restarted: false,
        }
    );
    assert!(machine.state().button_latched());
    assert_eq!(machine.state().elapsed_ms(), 1);
}

#[test]
fn test_on_hold_does_not_write_led() {
    let mut machine = CycleStateMachine::new();
    machine.step(true);

    for _ in 1..ON {
        let t = machine.step(false);
        assert_eq!(t.phase, Phase::OnHold);
        assert_eq!(t.action, LedAction::Hold);
        assert!(machine.led_on());
    }
    assert_eq!(machine.state().elapsed_ms(), ON_PHASE_MS);
}

#[test]
fn test_boundary_ticks() {
    let mut machine = CycleStateMachine::new();
    let mut transitions = Vec::new();
    transitions.push(machine.step(true));
    for _ in 1..=PERIOD {
        transitions.push(machine.step(false));
    }

    assert_eq!(transitions[ON - 1].phase, Phase::OnHold);
    assert_eq!(transitions[ON].phase, Phase::Off);
    assert_eq!(transitions[ON].action, LedAction::Off);

    let last = transitions[PERIOD - 1];
    assert_eq!(last.phase, Phase::Off);
    assert_eq!(last.action, LedAction::Off);
    assert!(last.restarted);
    assert!(transitions[..PERIOD - 1].iter().all(|t| !t.restarted));

    let next = transitions[PERIOD];
    assert_eq!(next.phase, Phase::OnStart);
    assert_eq!(next.action, LedAction::On);
    assert!(!next.latched);
}

#[test]
fn test_restart_keeps_latch() {
    let mut machine = CycleStateMachine::new();
    machine.step(true);
    for _ in 1..PERIOD {
        machine.step(false);
    }

    assert_eq!(machine.state().elapsed_ms(), 0);
    assert!(machine.state().button_latched());
    assert_eq!(machine.state().phase(), Phase::OnStart);
}

#[test]
fn test_transition_is_const() {
    const AFTER_PRESS: CycleState = transition(CycleState::new(), true).0;

    assert!(AFTER_PRESS.button_latched());
    assert_eq!(AFTER_PRESS.elapsed_ms(), 1);
}

#[test]
fn test_led_action_apply() {
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let mut led = PinMock::new(&expectations);

    LedAction::On.apply(&mut led).unwrap();
    LedAction::Hold.apply(&mut led).unwrap();
    LedAction::Off.apply(&mut led).unwrap();

    led.done();
}

#[test]
fn test_drive_samples_button_and_writes_led() {
    // Idle tick, then held for a full cycle, then released for one more tick.
    let mut button_reads = vec![PinTransaction::get(PinState::High)];
    button_reads.extend((0..PERIOD).map(|_| PinTransaction::get(PinState::Low)));
    button_reads.push(PinTransaction::get(PinState::High));

    let mut led_writes = vec![
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    led_writes.extend((ON..PERIOD).map(|_| PinTransaction::set(PinState::Low)));
    led_writes.push(PinTransaction::set(PinState::High));

    let mut button = ActiveLowButton::new(PinMock::new(&button_reads), 0);
    let mut led = PinMock::new(&led_writes);
    let mut machine = CycleStateMachine::new();

    let idle = machine.drive(&mut button, &mut led).unwrap();
    assert_eq!(idle.phase, Phase::Idle);

    let start = machine.drive(&mut button, &mut led).unwrap();
    assert!(start.latched);
    assert_eq!(start.phase, Phase::OnStart);

    let mut restarted = 0;
    for _ in 1..PERIOD {
        let step = machine.drive(&mut button, &mut led).unwrap();
        restarted += usize::from(step.restarted);
    }
    assert_eq!(restarted, 1);
    assert_eq!(machine.state().elapsed_ms(), 0);

    let again = machine.drive(&mut button, &mut led).unwrap();
    assert_eq!(again.phase, Phase::OnStart);
    assert!(!again.latched);
    assert!(machine.led_on());

    button.release().done();
    led.done();
}

struct BrokenLed;

impl ErrorType for BrokenLed {
    type Error = ErrorKind;
}

impl OutputPin for BrokenLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

#[test]
fn test_drive_advances_even_when_led_write_fails() {
    let expectations = [PinTransaction::get(PinState::Low)];
    let mut button = ActiveLowButton::new(PinMock::new(&expectations), 0);
    let mut machine = CycleStateMachine::new();

    assert_eq!(machine.drive(&mut button, &mut BrokenLed), Err(ErrorKind::Other));
    assert!(machine.state().button_latched());
    assert_eq!(machine.state().elapsed_ms(), 1);

    button.release().done();
}
