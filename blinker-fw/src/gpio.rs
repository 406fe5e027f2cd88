// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Bank 0 GPIO through the SIO block.
//!
//! [`Bank0`] writes whole-bank register images for start-up configuration.
//! The pins it hands out afterwards are zero-sized and touch only their own
//! bit through the atomic SIO set/clear registers.

use blinker_common::{PortConfig, PortRegisters};
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use rp2040_hal::pac;

const BANK0_PINS: usize = 30;
const BANK0_MASK: u32 = (1 << BANK0_PINS) - 1;

/// IO_BANK0 function select routing a pad to SIO.
const FUNCSEL_SIO: u8 = 5;

fn sio() -> &'static pac::sio::RegisterBlock {
    // SAFETY: only the set/clear/input registers are used through this
    // reference, each access is a single word and touches no shared state.
    unsafe { &*pac::SIO::ptr() }
}

pub struct Bank0 {
    sio: pac::SIO,
    io: pac::IO_BANK0,
    pads: pac::PADS_BANK0,
}

impl Bank0 {
    /// Takes IO_BANK0 and PADS_BANK0 out of reset.
    pub fn new(
        sio: pac::SIO,
        io: pac::IO_BANK0,
        pads: pac::PADS_BANK0,
        resets: &mut pac::RESETS,
    ) -> Self {
        resets
            .reset()
            .modify(|_, w| w.io_bank0().clear_bit().pads_bank0().clear_bit());
        loop {
            let done = resets.reset_done().read();
            if done.io_bank0().bit_is_set() && done.pads_bank0().bit_is_set() {
                break;
            }
        }
        Self { sio, io, pads }
    }

    /// Applies `config` and hands out the button and LED pins.
    pub fn configure<const BUTTON: u8, const LED: u8>(
        mut self,
        config: &PortConfig<1>,
    ) -> (SioInput<BUTTON>, SioOutput<LED>) {
        config.apply(&mut self);
        defmt::println!(
            "GPIO: inputs 0x{:08x}, pull-ups 0x{:08x}",
            config.bank(0).inputs,
            config.bank(0).pull_ups
        );
        (SioInput { _private: () }, SioOutput { _private: () })
    }
}

impl PortRegisters for Bank0 {
    fn write_latch(&mut self, _bank: usize, value: u32) {
        self.sio
            .gpio_out()
            .write(|w| unsafe { w.bits(value & BANK0_MASK) });
    }

    fn write_analog(&mut self, _bank: usize, analog: u32) {
        for pin in 0..BANK0_PINS {
            let digital = analog & (1 << pin) == 0;
            self.pads.gpio(pin).modify(|_, w| w.ie().bit(digital));
        }
    }

    fn write_pull_ups(&mut self, _bank: usize, pull_ups: u32) {
        for pin in 0..BANK0_PINS {
            let up = pull_ups & (1 << pin) != 0;
            self.pads
                .gpio(pin)
                .modify(|_, w| w.pue().bit(up).pde().clear_bit());
        }
    }

    fn write_direction(&mut self, _bank: usize, inputs: u32) {
        // SIO output enable is still clear from reset, so routing first
        // cannot drive a pad.
        for pin in 0..BANK0_PINS {
            self.io
                .gpio(pin)
                .gpio_ctrl()
                .write(|w| unsafe { w.funcsel().bits(FUNCSEL_SIO) });
        }
        self.sio
            .gpio_oe()
            .write(|w| unsafe { w.bits(!inputs & BANK0_MASK) });
    }
}

/// SIO input on pin `PIN`.
pub struct SioInput<const PIN: u8> {
    _private: (),
}

impl<const PIN: u8> ErrorType for SioInput<PIN> {
    type Error = Infallible;
}

impl<const PIN: u8> InputPin for SioInput<PIN> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(sio().gpio_in().read().bits() & (1 << PIN) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// SIO output on pin `PIN`.
pub struct SioOutput<const PIN: u8> {
    _private: (),
}

impl<const PIN: u8> ErrorType for SioOutput<PIN> {
    type Error = Infallible;
}

impl<const PIN: u8> OutputPin for SioOutput<PIN> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        sio().gpio_out_set().write(|w| unsafe { w.bits(1 << PIN) });
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        sio().gpio_out_clr().write(|w| unsafe { w.bits(1 << PIN) });
        Ok(())
    }
}
