// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board constants and the start-up configuration derived from them.
//!
//! Everything here is evaluated at compile time. A clock target the PLL
//! cannot reach, or a tick that is not a whole number of cycles, stops the
//! build.

use blinker_common::{solve, HardwareConfig, PllLimits, PortConfig, Prescale};

/// Crystal on XIN/XOUT.
pub const XOSC_HZ: u32 = 12_000_000;

/// System (instruction) clock.
pub const INSTRUCTION_HZ: u32 = 50_000_000;

pub const CLOCK_TOLERANCE_PPM: u32 = 100;

/// Instruction cycle the tick timing is written against.
pub const INSTRUCTION_CYCLE_NS: u32 = 20;

/// RP2040 user GPIOs form a single bank.
pub const BANK0: usize = 0;

/// Push button to ground, read through the internal pull-up.
pub const BUTTON_PIN: u8 = 2;

/// On-board LED.
pub const LED_PIN: u8 = 25;

/// Pico board sense lines driven by on-board dividers. Never outputs.
pub const VBUS_SENSE_PIN: u8 = 24;
pub const VSYS_SENSE_PIN: u8 = 29;

pub const SYSTICK_COUNTER_BITS: u8 = 24;

/// Cortex-M0+ implements the top two priority bits only.
pub const SYSTICK_PRIORITY: u8 = 0x40;

/// Consecutive agreeing samples before the button level changes.
pub const BUTTON_DEBOUNCE_TICKS: u8 = if cfg!(feature = "debounce") { 5 } else { 0 };

pub const HARDWARE: HardwareConfig<1> = HardwareConfig::expect_valid(HardwareConfig::new(
    solve(
        XOSC_HZ,
        INSTRUCTION_HZ,
        &PllLimits::RP2040,
        CLOCK_TOLERANCE_PPM,
    ),
    PortConfig::new()
        .with_digital_input(BANK0, BUTTON_PIN)
        .with_pull_up(BANK0, BUTTON_PIN)
        .with_digital_input(BANK0, VBUS_SENSE_PIN)
        .with_digital_input(BANK0, VSYS_SENSE_PIN),
    SYSTICK_COUNTER_BITS,
    // SysTick counts the processor clock directly.
    &[Prescale::Div1],
));

const _: () = assert!(HARDWARE.clock.instruction_cycle_ns() == INSTRUCTION_CYCLE_NS);
const _: () = assert!(HARDWARE.clock.post_divider_pair().is_some());
const _: () = assert!(matches!(HARDWARE.tick.prescale, Prescale::Div1));
const _: () = assert!(HARDWARE.ports.is_digital_input(BANK0, BUTTON_PIN));
const _: () = assert!(HARDWARE.ports.bank(BANK0).inputs & (1 << LED_PIN) == 0);
