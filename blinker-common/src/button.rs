// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Button sampling.

use embedded_hal::digital::InputPin;

/// Integrating debounce filter, sampled once per tick.
///
/// Each pressed sample moves the counter up, each released sample down. The
/// reported level only flips when the counter hits either end. A threshold of
/// 0 or 1 reports raw samples.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    threshold: u8,
    count: u8,
    pressed: bool,
}

impl Debouncer {
    pub const fn new(threshold: u8) -> Self {
        Self {
            threshold,
            count: 0,
            pressed: false,
        }
    }

    pub fn update(&mut self, raw_pressed: bool) -> bool {
        if self.threshold <= 1 {
            self.pressed = raw_pressed;
            return self.pressed;
        }

        if raw_pressed {
            self.count = self.count.saturating_add(1).min(self.threshold);
        } else {
            self.count = self.count.saturating_sub(1);
        }

        if self.count == self.threshold {
            self.pressed = true;
        } else if self.count == 0 {
            self.pressed = false;
        }
        self.pressed
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Pulled-up button that reads low while pressed.
pub struct ActiveLowButton<P> {
    pin: P,
    filter: Debouncer,
}

impl<P: InputPin> ActiveLowButton<P> {
    pub fn new(pin: P, debounce_ticks: u8) -> Self {
        Self {
            pin,
            filter: Debouncer::new(debounce_ticks),
        }
    }

    /// Reads the pin once. A failed read counts as released.
    pub fn sample(&mut self) -> bool {
        let raw = self.pin.is_low().unwrap_or(false);
        self.filter.update(raw)
    }

    pub fn release(self) -> P {
        self.pin
    }
}
