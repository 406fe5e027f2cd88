// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Per-bank pin direction, analog mode, pull-up and output latch.
//!
//! Every pin starts as a digital output driven low. Pins that must read
//! (the button, programming-interface pins) are explicit overrides on top of
//! that default and always come out digital.

/// Register values for one pin bank. Bit `n` describes pin `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BankConfig {
    /// Set bits are inputs.
    pub inputs: u32,
    /// Set bits keep their analog function (digital input buffer off).
    pub analog: u32,
    /// Output latch value.
    pub latch: u32,
    /// Set bits enable the internal pull-up.
    pub pull_ups: u32,
}

impl BankConfig {
    pub const DIGITAL_OUTPUT_LOW: Self = Self {
        inputs: 0,
        analog: 0,
        latch: 0,
        pull_ups: 0,
    };

    /// Input direction with the analog function disabled.
    pub const fn with_digital_inputs(mut self, mask: u32) -> Self {
        self.inputs |= mask;
        self.analog &= !mask;
        self
    }

    pub const fn with_pull_ups(mut self, mask: u32) -> Self {
        self.pull_ups |= mask;
        self
    }

    pub const fn is_digital_input(&self, pin: u8) -> bool {
        let bit = 1 << pin;
        self.inputs & bit != 0 && self.analog & bit == 0
    }
}

/// Register writes for pin banks, implemented by the board.
pub trait PortRegisters {
    fn write_latch(&mut self, bank: usize, value: u32);
    fn write_analog(&mut self, bank: usize, analog: u32);
    fn write_pull_ups(&mut self, bank: usize, pull_ups: u32);
    fn write_direction(&mut self, bank: usize, inputs: u32);
}

/// Pin configuration for every bank of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig<const BANKS: usize> {
    banks: [BankConfig; BANKS],
}

impl<const BANKS: usize> PortConfig<BANKS> {
    pub const fn new() -> Self {
        Self {
            banks: [BankConfig::DIGITAL_OUTPUT_LOW; BANKS],
        }
    }

    pub const fn with_digital_input(mut self, bank: usize, pin: u8) -> Self {
        self.banks[bank] = self.banks[bank].with_digital_inputs(1 << pin);
        self
    }

    /// Programming/debug pins have to stay high-impedance for the external tool.
    pub const fn with_programming_pins(mut self, bank: usize, mask: u32) -> Self {
        self.banks[bank] = self.banks[bank].with_digital_inputs(mask);
        self
    }

    pub const fn with_pull_up(mut self, bank: usize, pin: u8) -> Self {
        self.banks[bank] = self.banks[bank].with_pull_ups(1 << pin);
        self
    }

    pub const fn bank(&self, bank: usize) -> &BankConfig {
        &self.banks[bank]
    }

    pub const fn is_digital_input(&self, bank: usize, pin: u8) -> bool {
        self.banks[bank].is_digital_input(pin)
    }

    /// Writes every bank. The latch goes out before the direction so an
    /// output never drives anything but its intended level.
    pub fn apply<R: PortRegisters>(&self, regs: &mut R) {
        for (index, bank) in self.banks.iter().enumerate() {
            regs.write_latch(index, bank.latch);
            regs.write_analog(index, bank.analog);
            regs.write_pull_ups(index, bank.pull_ups);
            regs.write_direction(index, bank.inputs);
        }
    }
}

impl<const BANKS: usize> Default for PortConfig<BANKS> {
    fn default() -> Self {
        Self::new()
    }
}
