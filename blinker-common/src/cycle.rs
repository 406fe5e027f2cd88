// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Button-triggered blink cycle, advanced once per tick.
//!
//! ```text
//! elapsed_ms   0        1..1000         1000..3000      -> 3000
//!            OnStart    OnHold          Off              wraps to 0
//! LED        on         (unchanged)     off
//! ```
//!
//! The first observed press latches the cycle and it repeats forever with a
//! period of [`CYCLE_PERIOD_MS`] ticks. The latch is never cleared.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::button::ActiveLowButton;

/// Ticks of the on-phase, counted from the cycle start.
pub const ON_PHASE_MS: u16 = 1000;

/// Ticks of a full cycle. `elapsed_ms` never holds this value between ticks.
pub const CYCLE_PERIOD_MS: u16 = 3000;

/// Timings of a duty-cycle modulated blink that no code path reads.
///
/// They describe a start-off / DC-on / PWM-on / end-off sequence repeated a
/// fixed number of times, with the PWM periods in 20 ns instruction cycles.
/// The live cycle is defined by [`ON_PHASE_MS`] and [`CYCLE_PERIOD_MS`] alone.
pub mod unused {
    pub const CYCLE_START_OFF_MS: u16 = 500;
    pub const CYCLE_ON_DC_MS: u16 = 250;
    pub const CYCLE_ON_PWM_MS: u16 = 750;
    pub const CYCLE_END_OFF_MS: u16 = 500;
    pub const NUM_OF_CYCLES: u16 = 10;
    pub const DUTY_CYCLE_PERIOD_CYCLES: u32 = 5_000;
    pub const PWM_PERIOD_CYCLES: u32 = 10_000;
}

/// Where a latched cycle is, or `Idle` before the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    OnStart,
    OnHold,
    Off,
}

/// Output write decided for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedAction {
    /// Leave the pin alone.
    Hold,
    On,
    Off,
}

impl LedAction {
    pub fn apply<P: OutputPin>(self, led: &mut P) -> Result<(), P::Error> {
        match self {
            Self::Hold => Ok(()),
            Self::On => led.set_high(),
            Self::Off => led.set_low(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleState {
    button_latched: bool,
    elapsed_ms: u16,
}

impl CycleState {
    pub const fn new() -> Self {
        Self {
            button_latched: false,
            elapsed_ms: 0,
        }
    }

    pub const fn button_latched(&self) -> bool {
        self.button_latched
    }

    pub const fn elapsed_ms(&self) -> u16 {
        self.elapsed_ms
    }

    pub const fn phase(&self) -> Phase {
        if !self.button_latched {
            Phase::Idle
        } else if self.elapsed_ms == 0 {
            Phase::OnStart
        } else if self.elapsed_ms < ON_PHASE_MS {
            Phase::OnHold
        } else {
            Phase::Off
        }
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Phase the tick was evaluated in.
    pub phase: Phase,
    pub action: LedAction,
    /// The button latched on this tick.
    pub latched: bool,
    /// The counter wrapped back to the cycle start on this tick.
    pub restarted: bool,
}

/// Advances `state` by one tick.
pub const fn transition(state: CycleState, button_pressed: bool) -> (CycleState, Transition) {
    let mut next = state;
    let latched = !state.button_latched && button_pressed;
    if latched {
        next.button_latched = true;
        next.elapsed_ms = 0;
    }

    let phase = next.phase();
    let action = match phase {
        Phase::Idle => LedAction::Off,
        Phase::OnStart => LedAction::On,
        Phase::OnHold => LedAction::Hold,
        Phase::Off => LedAction::Off,
    };

    let mut restarted = false;
    if next.button_latched {
        next.elapsed_ms += 1;
        if next.elapsed_ms >= CYCLE_PERIOD_MS {
            next.elapsed_ms = 0;
            restarted = true;
        }
    }

    (
        next,
        Transition {
            phase,
            action,
            latched,
            restarted,
        },
    )
}

/// [`CycleState`] plus the LED level it has produced so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleStateMachine {
    state: CycleState,
    led_on: bool,
}

impl CycleStateMachine {
    pub const fn new() -> Self {
        Self {
            state: CycleState::new(),
            led_on: false,
        }
    }

    pub fn step(&mut self, button_pressed: bool) -> Transition {
        let (next, transition) = transition(self.state, button_pressed);
        self.state = next;
        match transition.action {
            LedAction::On => self.led_on = true,
            LedAction::Off => self.led_on = false,
            LedAction::Hold => {}
        }
        transition
    }

    /// One tick against real pins: samples `button`, steps, writes `led`.
    ///
    /// The state advances even if the LED write fails.
    pub fn drive<B: InputPin, L: OutputPin>(
        &mut self,
        button: &mut ActiveLowButton<B>,
        led: &mut L,
    ) -> Result<Transition, L::Error> {
        let transition = self.step(button.sample());
        transition.action.apply(led)?;
        Ok(transition)
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn led_on(&self) -> bool {
        self.led_on
    }
}
