// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Hardware-independent core of the button-triggered blinker.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: Enables `std` support for host builds
//! - `defmt` feature: Derives `defmt::Format` for logging from firmware
//!
//! Everything that decides *what* the hardware should do lives here: PLL math,
//! per-bank pin configuration, the millisecond tick derivation and signal, and
//! the blink cycle itself. Register access stays in the firmware crate behind
//! the [`port::PortRegisters`] and [`tick::TickSource`] traits.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod button;
pub mod clock;
pub mod cycle;
pub mod hardware;
pub mod port;
pub mod service;
pub mod tick;

// Re-export commonly used types
pub use button::{ActiveLowButton, Debouncer};
pub use clock::{solve, ClockConfig, ClockError, PllLimits};
pub use cycle::{CycleState, CycleStateMachine, LedAction, Phase, Transition};
pub use cycle::{CYCLE_PERIOD_MS, ON_PHASE_MS};
pub use hardware::{ConfigError, HardwareConfig};
pub use port::{BankConfig, PortConfig, PortRegisters};
pub use service::{run_tick, Service, ServiceContext};
pub use tick::{Prescale, TickChannel, TickConsumer, TickError, TickEvent, TickProducer};
pub use tick::{start_ticks, TickSource, TickTimerConfig, TICK_PERIOD_NS};
