// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Complete start-up configuration, built once and handed to the board.

use crate::clock::{ClockConfig, ClockError};
use crate::port::PortConfig;
use crate::tick::{Prescale, TickError, TickTimerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    Clock(ClockError),
    Tick(TickError),
}

/// Clock, pin and tick timer settings. The tick timer is always derived from
/// the clock so the two cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareConfig<const BANKS: usize> {
    pub clock: ClockConfig,
    pub ports: PortConfig<BANKS>,
    pub tick: TickTimerConfig,
}

impl<const BANKS: usize> HardwareConfig<BANKS> {
    pub const fn new(
        clock: Result<ClockConfig, ClockError>,
        ports: PortConfig<BANKS>,
        counter_bits: u8,
        prescalers: &[Prescale],
    ) -> Result<Self, ConfigError> {
        let clock = match clock {
            Ok(clock) => clock,
            Err(e) => return Err(ConfigError::Clock(e)),
        };
        match TickTimerConfig::derive(&clock, counter_bits, prescalers) {
            Ok(tick) => Ok(Self { clock, ports, tick }),
            Err(e) => Err(ConfigError::Tick(e)),
        }
    }

    /// Unwraps a configuration in const context; a bad one fails the build.
    pub const fn expect_valid(config: Result<Self, ConfigError>) -> Self {
        match config {
            Ok(config) => config,
            Err(ConfigError::Clock(ClockError::NoSolution)) => {
                panic!("no PLL setting reaches the target clock")
            }
            Err(ConfigError::Clock(ClockError::OutOfTolerance { .. })) => {
                panic!("closest PLL setting is outside the clock tolerance")
            }
            Err(ConfigError::Clock(ClockError::OutOfRange)) => {
                panic!("PLL setting outside hardware limits")
            }
            Err(ConfigError::Tick(TickError::InexactPeriod)) => {
                panic!("1 ms is not a whole number of instruction cycles")
            }
            Err(ConfigError::Tick(TickError::PeriodOutOfRange)) => {
                panic!("1 ms tick period does not fit the timer counter")
            }
        }
    }
}
